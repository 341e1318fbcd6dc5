// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-lines batch classification.
//!
//! Each input line is a request object. Each output line is either a result
//! or `{"line": n, "error": "..."}` for input that did not parse. Output
//! order matches input order even though classification runs concurrently.

use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};
use triage_core::{ClassificationRequest, ClassificationResult};
use triage_engine::ClassificationEngine;

/// One line of batch output.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BatchLine {
    Classified(Box<ClassificationResult>),
    Rejected { line: usize, error: String },
}

/// Counts reported after a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub classified: usize,
    pub rejected: usize,
}

/// Classify every request in `input`, writing one JSON line per request to `output`.
///
/// Blank lines are skipped. Input is read as results are written, so at most
/// `concurrency` requests are held in memory at once.
pub async fn run_batch<R, W>(
    engine: &ClassificationEngine,
    input: R,
    mut output: W,
    concurrency: usize,
) -> std::io::Result<BatchSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let concurrency = concurrency.max(1);
    debug!(concurrency, "batch started");

    let outputs = request_lines(input)
        .map(|item| async move {
            let (line, request) = item?;
            Ok::<_, std::io::Error>(match request {
                Ok(request) => BatchLine::Classified(Box::new(engine.classify(&request).await)),
                Err(e) => BatchLine::Rejected {
                    line,
                    error: e.to_string(),
                },
            })
        })
        .buffered(concurrency);
    let mut outputs = std::pin::pin!(outputs);

    let mut summary = BatchSummary::default();
    while let Some(out) = outputs.next().await {
        let out = out?;
        match out {
            BatchLine::Classified(_) => summary.classified += 1,
            BatchLine::Rejected { .. } => summary.rejected += 1,
        }
        let mut json = serde_json::to_string(&out).map_err(std::io::Error::other)?;
        json.push('\n');
        output.write_all(json.as_bytes()).await?;
    }
    output.flush().await?;

    info!(
        classified = summary.classified,
        rejected = summary.rejected,
        "batch complete"
    );
    Ok(summary)
}

type ParsedLine = (usize, Result<ClassificationRequest, serde_json::Error>);

/// Non-blank input lines with their 1-based line numbers, parsed lazily.
/// The stream ends after the first read error.
fn request_lines<R>(input: R) -> impl Stream<Item = std::io::Result<ParsedLine>>
where
    R: AsyncBufRead + Unpin,
{
    stream::unfold(Some((input.lines(), 0usize)), |state| async move {
        let (mut lines, mut line_no) = state?;
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    line_no += 1;
                    if line.trim().is_empty() {
                        continue;
                    }
                    let parsed = serde_json::from_str::<ClassificationRequest>(&line);
                    return Some((Ok((line_no, parsed)), Some((lines, line_no))));
                }
                Ok(None) => return None,
                Err(e) => return Some((Err(e), None)),
            }
        }
    })
}

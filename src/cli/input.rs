// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Reading commit messages from files, stdin and the command line.

use std::io::Read;

use crate::error::{Result, ResultExt};

/// Target name that stands for standard input.
pub const STDIN_TARGET: &str = "-";

/// A commit message together with a label naming where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSource {
    pub label: String,
    pub text: String,
}

/// Split a buffer holding NUL-separated messages (`git log -z`).
///
/// Whitespace-only chunks are dropped.
pub fn split_messages(buffer: &str) -> Vec<&str> {
    buffer
        .split('\0')
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}

/// Gather messages from `-m` arguments and targets.
///
/// With neither given, messages are read from stdin.
pub fn collect_messages(targets: &[String], inline: &[String]) -> Result<Vec<MessageSource>> {
    let mut sources: Vec<MessageSource> = inline
        .iter()
        .enumerate()
        .map(|(idx, text)| MessageSource {
            label: format!("message {}", idx + 1),
            text: text.clone(),
        })
        .collect();

    let stdin_only = [STDIN_TARGET.to_string()];
    let targets = if targets.is_empty() && inline.is_empty() {
        &stdin_only[..]
    } else {
        targets
    };

    for target in targets {
        let (name, buffer) = if target == STDIN_TARGET {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            ("stdin".to_string(), buffer)
        } else {
            let buffer = std::fs::read_to_string(target)
                .context(format!("Failed to read '{}'", target))?;
            (target.clone(), buffer)
        };

        let messages = split_messages(&buffer);
        tracing::debug!("Read {} message(s) from {}", messages.len(), name);
        let numbered = messages.len() > 1;
        sources.extend(messages.into_iter().enumerate().map(|(idx, text)| MessageSource {
            label: if numbered {
                format!("{}#{}", name, idx + 1)
            } else {
                name.clone()
            },
            text: text.to_string(),
        }));
    }

    Ok(sources)
}

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pixy_core::config::{AppConfig, LoadOptions};
use pixy_core::{DialogueEngine, EngineOutput};
use pixy_delivery::backup::FileBackupStore;
use pixy_delivery::pipeline::{DeliveryOutcome, LeadPipeline};
use pixy_delivery::submit::HttpLeadSubmitter;

use crate::commands::CommandResult;

/// Terminal rendition of the chat widget: same dialogue engine and
/// delivery pipeline as the server, stdin instead of HTTP.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("chat", "config", error.to_string(), 2),
    };

    let submitter = match HttpLeadSubmitter::new(
        config.submission.endpoint_url.clone(),
        Duration::from_secs(config.submission.timeout_secs),
    ) {
        Ok(submitter) => submitter,
        Err(error) => {
            return CommandResult::failure("chat", "http_client", error.to_string(), 2)
        }
    };
    let pipeline = LeadPipeline::new(
        Arc::new(submitter),
        Arc::new(FileBackupStore::new(config.backup.path.clone())),
    );

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::failure("chat", "runtime", error.to_string(), 2),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match chat_loop(&config, &pipeline, &runtime, &mut stdin.lock(), &mut stdout) {
        Ok(()) => CommandResult::success("chat", "chat session ended"),
        Err(error) => CommandResult::failure("chat", "io", error.to_string(), 1),
    }
}

fn chat_loop(
    config: &AppConfig,
    pipeline: &LeadPipeline,
    runtime: &tokio::runtime::Runtime,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    let mut engine = DialogueEngine::new();
    render_turn(output, &engine.greeting())?;

    let mut line = String::new();
    loop {
        write!(output, "you> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "pixy> Bye for now!")?;
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed.to_lowercase().as_str(), "exit" | "quit") {
            writeln!(output, "pixy> Bye for now!")?;
            return Ok(());
        }

        let mut turn = engine.process(trimmed);
        if let Some(draft) = turn.lead.take() {
            let record = draft.into_record(Utc::now());
            let outcome = runtime.block_on(pipeline.deliver(&record));
            match outcome {
                DeliveryOutcome::Delivered => {}
                DeliveryOutcome::BackedUp { .. } | DeliveryOutcome::Lost { .. } => {
                    turn.replies.push(fallback_message(config));
                }
            }
        }
        render_turn(output, &turn)?;

        if engine.stage().is_closed() {
            return Ok(());
        }
    }
}

fn render_turn(output: &mut impl Write, turn: &EngineOutput) -> io::Result<()> {
    for reply in &turn.replies {
        writeln!(output, "pixy> {reply}")?;
    }
    if !turn.quick_replies.is_empty() {
        writeln!(output, "      [{}]", turn.quick_replies.join(" | "))?;
    }
    Ok(())
}

fn fallback_message(config: &AppConfig) -> String {
    format!(
        "We couldn't send your details automatically just now. Please reach us directly at \
         {} or {} and we'll take it from there.",
        config.submission.fallback_email, config.submission.fallback_phone
    )
}

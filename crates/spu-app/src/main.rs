//! Spu application binary - composition root.
//!
//! Ties the Spu crates into a single executable:
//! 1. Load configuration from TOML, then apply env and CLI overrides
//! 2. Load the knowledge base (built-in RevX corpus or a TOML file)
//! 3. Build the answer pipeline, with the language-model enhancer if enabled
//! 4. Run either the terminal chat (text plus simulated voice) or the HTTP API

mod cli;
mod console;
mod repl;

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use spu_api::AppState;
use spu_chat::{AnswerEnhancer, AnswerPipeline, ChatError, ChatOrchestrator};
use spu_core::config::SpeechConfig;
use spu_core::{KnowledgeBase, SpuConfig, Utterance};
use spu_speech::{SpeechEvent, SpeechSession, SpeechState};

use cli::{CliArgs, Command};
use console::ConsoleMicrophone;
use repl::ReplInput;

/// Build the shared answer pipeline from configuration.
fn build_pipeline(config: &SpuConfig) -> Result<AnswerPipeline, Box<dyn Error>> {
    let knowledge = match &config.knowledge.path {
        Some(path) => KnowledgeBase::load(std::path::Path::new(path))?,
        None => KnowledgeBase::revx(),
    };
    tracing::info!(business = %knowledge.name, "Knowledge base ready");

    let enhancer = if config.enhancer.enabled {
        Some(AnswerEnhancer::from_config(&config.enhancer)?.with_persona(&knowledge))
    } else {
        tracing::info!("Answer enhancement disabled; serving rule-based answers");
        None
    };

    let mut pipeline = AnswerPipeline::new(Arc::new(knowledge), &config.chat);
    if let Some(enhancer) = enhancer {
        pipeline = pipeline.with_enhancer(enhancer);
    }
    Ok(pipeline)
}

// =============================================================================
// Terminal chat
// =============================================================================

async fn print_flush(text: &str) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await
}

/// Send one utterance through the conversation and print the reply.
async fn answer(chat: &mut ChatOrchestrator, utterance: Utterance) {
    match chat.submit_utterance(utterance).await {
        Ok(outcome) => {
            tracing::debug!(rule = outcome.rule, enhanced = outcome.enhanced, "Turn answered");
            println!("\nSpu: {}\n", outcome.answer);
        }
        Err(ChatError::EmptyMessage) => {}
        Err(e) => println!("! {}", e),
    }
}

async fn run_chat(
    pipeline: Arc<AnswerPipeline>,
    speech: &SpeechConfig,
    voice: bool,
) -> Result<(), Box<dyn Error>> {
    let mut chat = ChatOrchestrator::new(pipeline);
    let mut session = SpeechSession::new(ConsoleMicrophone::new(voice && speech.enabled), speech);

    // Warnings are shown without blocking the text channel.
    let mut events = session.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SpeechEvent::Warning(reason)) => eprintln!("[voice input disabled] {}", reason),
                Ok(SpeechEvent::StateChanged { to, .. }) => {
                    if to == SpeechState::Listening {
                        eprintln!("[listening - type what you would say, then :stop]");
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Speech event subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("{}\n", repl::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let prompt = if session.is_listening() { "(listening) " } else { "> " };
        print_flush(prompt).await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match repl::parse(&line) {
            ReplInput::Empty => {}
            ReplInput::Quit => break,
            ReplInput::Help => println!("{}", repl::HELP),
            ReplInput::History => {
                for turn in chat.log().iter() {
                    println!("[{}] {}", turn.role.as_str(), turn.content);
                }
            }
            ReplInput::Unknown(cmd) => println!("Unknown command :{} (try :help)", cmd),
            ReplInput::Voice => {
                if let Err(e) = session.start().await {
                    tracing::debug!(error = %e, "Voice start refused");
                    if matches!(e, spu_speech::SpeechError::Unavailable(_)) {
                        println!("Voice input is disabled. Use :reset to try again.");
                    }
                }
            }
            ReplInput::Stop => {
                if let Some(utterance) = session.stop()? {
                    println!("(heard) {}", utterance.text);
                    answer(&mut chat, utterance).await;
                }
            }
            ReplInput::Abort => session.abort()?,
            ReplInput::Reset => session.clear_error()?,
            ReplInput::Text(text) if session.is_listening() => {
                let snapshot = session.capability().hear(session.transcript(), &text);
                if let Some(utterance) = session.on_recognition(snapshot)? {
                    println!("(heard) {}", utterance.text);
                    answer(&mut chat, utterance).await;
                }
            }
            ReplInput::Text(text) => answer(&mut chat, Utterance::typed(text)).await,
        }
    }

    // Leaving mid-turn discards the recognizer without a final result.
    if session.capability().is_active() {
        session.abort()?;
    }
    tracing::info!(turns = chat.log().len(), "Conversation ended");
    Ok(())
}

// =============================================================================
// Entry point
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = SpuConfig::load_or_default(&config_file);
    cli::apply_enhancer_env(&mut config.enhancer);
    if let Some(path) = &args.knowledge {
        config.knowledge.path = Some(path.to_string_lossy().to_string());
    }

    // Tracing. Logs go to stderr so the conversation owns stdout.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Spu v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        path = %config_file.display(),
        found = config_file.exists(),
        "Configuration resolved"
    );

    let pipeline = Arc::new(build_pipeline(&config)?);

    match args.command() {
        Command::Chat { no_voice } => run_chat(pipeline, &config.speech, !no_voice).await?,
        Command::Serve { .. } => {
            config.api.port = args.resolve_port(config.api.port);
            config.api.host = args.resolve_host(&config.api.host);
            let state = AppState::new(pipeline, config.api.clone());
            if let Err(e) = spu_api::start_server(state).await {
                tracing::error!(error = %e, "API server stopped");
                tracing::error!("Try: SPU_PORT={} spu serve", config.api.port.wrapping_add(1));
                return Err(e.into());
            }
        }
    }

    Ok(())
}

//! # Shell Interativo
//!
//! Loop de leitura → resposta no terminal, usando o mesmo [`Chatbot`] da
//! API HTTP.
//!
//! | Entrada | Efeito |
//! |---------|--------|
//! | `quit`, `exit`, `bye` | Despedida e fim do loop |
//! | `help` | Lista comandos e perguntas de exemplo |
//! | linha vazia | Pede a mensagem de novo |
//! | qualquer outra | Resposta do chatbot |
//!
//! Com `--debug`, cada resposta é seguida de intent, confiança e sentimento.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::orchestrator::Chatbot;

const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "bye"];

const SAMPLE_QUESTIONS: [&str; 5] = [
    "What courses do you offer?",
    "How much are the fees?",
    "Do you provide internships?",
    "How do I enroll?",
    "Will I get a certificate?",
];

/// Treina antes de abrir o shell; sem modelo não há conversa no terminal.
pub fn prepare(chatbot: &Chatbot, data: &Path) -> anyhow::Result<()> {
    let summary = chatbot
        .train_from_csv(data)
        .with_context(|| format!("Failed to initialize chatbot from {}", data.display()))?;
    tracing::info!(
        examples = summary.examples,
        intents = summary.intents,
        features = summary.features,
        "✅ Model trained successfully"
    );
    Ok(())
}

pub struct ShellOptions {
    pub user_id: String,
    pub debug: bool,
    /// Idioma das mensagens digitadas (`"en"` dispensa tradução).
    pub language: String,
}

/// Roda o shell até EOF ou um comando de saída.
pub async fn run<R, W>(chatbot: &Chatbot, options: &ShellOptions, input: R, mut out: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Intent Chat. Type 'help' for commands or 'quit' to exit.")?;
    if !chatbot.is_trained() {
        writeln!(out, "(model not trained, every message will be answered as Unknown)")?;
    }

    let mut lines = input.lines();
    loop {
        write!(out, "\nYou: ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let message = line.trim();

        if message.is_empty() {
            writeln!(out, "Please enter a message.")?;
            continue;
        }
        if EXIT_COMMANDS.contains(&message.to_lowercase().as_str()) {
            writeln!(out, "Bot: Goodbye! Have a great day!")?;
            break;
        }
        if message.eq_ignore_ascii_case("help") {
            print_help(&mut out)?;
            continue;
        }

        let reply = chatbot.respond(message, &options.user_id, &options.language).await;
        writeln!(out, "Bot: {}", reply.response)?;
        if options.debug {
            writeln!(
                out,
                "     [intent: {}, confidence: {:.3}, sentiment: {}]",
                reply.intent, reply.confidence, reply.sentiment
            )?;
        }
    }

    tracing::debug!(user_id = %options.user_id, "Shell encerrado");
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  help             show this message")?;
    writeln!(out, "  quit, exit, bye  leave the chat")?;
    writeln!(out, "Try asking:")?;
    for question in SAMPLE_QUESTIONS {
        writeln!(out, "  - {}", question)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::core::TrainingExample;

    fn options(debug: bool) -> ShellOptions {
        ShellOptions {
            user_id: "shell".to_string(),
            debug,
            language: "en".to_string(),
        }
    }

    fn trained() -> Chatbot {
        let bot = Chatbot::new(EngineConfig::default());
        bot.train(&[
            TrainingExample::new("what courses do you offer", "Courses", "We offer AI, ML and Data Science courses."),
            TrainingExample::new("how much are the fees", "Fees", "Fees start at 5000."),
        ])
        .unwrap();
        bot
    }

    async fn transcript(bot: &Chatbot, debug: bool, input: &str) -> String {
        let mut out = Vec::new();
        run(bot, &options(debug), input.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn answers_until_quit() {
        let bot = trained();
        let text = transcript(&bot, false, "what courses do you offer\nquit\nhow much are the fees\n").await;
        assert!(text.contains("Bot: We offer AI, ML and Data Science courses."));
        assert!(text.contains("Goodbye!"));
        assert!(!text.contains("Fees start at 5000."));
        assert_eq!(bot.session("shell").len(), 1);
    }

    #[tokio::test]
    async fn blank_line_reprompts_without_engine() {
        let bot = trained();
        let text = transcript(&bot, false, "   \nexit\n").await;
        assert!(text.contains("Please enter a message."));
        assert!(bot.session("shell").is_empty());
    }

    #[tokio::test]
    async fn help_lists_samples() {
        let bot = trained();
        let text = transcript(&bot, false, "HELP\nbye\n").await;
        assert!(text.contains("quit, exit, bye"));
        assert!(text.contains("What courses do you offer?"));
        assert!(bot.session("shell").is_empty());
    }

    #[tokio::test]
    async fn debug_shows_classification() {
        let bot = trained();
        let text = transcript(&bot, true, "how much are the fees\n").await;
        assert!(text.contains("[intent: Fees, confidence: "));
        assert!(text.contains("sentiment: neutral]"));
    }

    #[tokio::test]
    async fn eof_ends_the_loop() {
        let bot = Chatbot::new(EngineConfig::default());
        let text = transcript(&bot, false, "").await;
        assert!(text.contains("model not trained"));
    }

    #[test]
    fn prepare_fails_without_dataset() {
        let bot = Chatbot::new(EngineConfig::default());
        let err = prepare(&bot, Path::new("/no/such/intents.csv")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to initialize chatbot"));
        assert!(!bot.is_trained());
    }

    #[test]
    fn prepare_trains_from_bundled_dataset() {
        let bot = Chatbot::new(EngineConfig::default());
        prepare(&bot, Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/intents.csv"))).unwrap();
        assert!(bot.is_trained());
    }
}

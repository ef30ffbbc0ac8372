//! Terminal chat session.
//!
//! A session owns the conversation history and forwards each user turn to
//! the shared pipeline. It never decides anything about the answer: the
//! pipeline's text is stored and printed as-is.

use std::sync::Arc;
use sungbat_core::ScoredNode;
use sungbat_query::BilingualQueryPipeline;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// First assistant turn of every session.
pub const WELCOME_MESSAGE: &str =
    "👋 Hello gayyemko! Anya ngay ti maitulong ko kenyam? (Hello friend! How can I help you?)";
/// Input prompt.
pub const INPUT_PROMPT: &str =
    "Agsaludsod ka maipapan iti konstitusion... (Ask about the constitution...)";
/// Shown while the pipeline runs.
pub const THINKING_MESSAGE: &str = "Agpampanunot... (Thinking...)";
/// Farewell printed when the session ends.
pub const GOODBYE_MESSAGE: &str = "Agyamanak! (Thank you!) 👋";

/// Who said a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The person asking.
    User,
    /// The chatbot.
    Assistant,
}

impl Role {
    /// Lowercase role name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Speaker.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatTurn {
    fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Render retrieved chunks as a numbered list of file names.
pub fn format_sources(sources: &[ScoredNode]) -> String {
    if sources.is_empty() {
        return "No sources found.".to_string();
    }

    let mut formatted = String::from("📚 **Sources:**\n");
    for (i, source) in sources.iter().enumerate() {
        let filename = source
            .node
            .filename()
            .unwrap_or_else(|| "Unknown".to_string());
        formatted.push_str(&format!("{}. {}\n", i + 1, filename));
    }
    formatted
}

/// Command recognised on the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    History,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "/quit" | "/exit" => Some(Command::Quit),
        "/history" => Some(Command::History),
        _ => None,
    }
}

/// A conversation with the chatbot.
#[derive(Debug)]
pub struct ChatSession {
    pipeline: Arc<BilingualQueryPipeline>,
    history: Vec<ChatTurn>,
    show_sources: bool,
}

impl ChatSession {
    /// Start a session; the history begins with [`WELCOME_MESSAGE`].
    pub fn new(pipeline: Arc<BilingualQueryPipeline>) -> Self {
        Self {
            pipeline,
            history: vec![ChatTurn::new(Role::Assistant, WELCOME_MESSAGE)],
            show_sources: false,
        }
    }

    /// Print the source list after every answer.
    #[must_use]
    pub fn with_sources(mut self, show_sources: bool) -> Self {
        self.show_sources = show_sources;
        self
    }

    /// Turns so far, oldest first.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Send one user message and return the assistant's reply.
    ///
    /// Both turns are appended to the history. When sources are enabled
    /// the reply carries the formatted source list after a blank line.
    pub async fn send(&mut self, message: &str) -> String {
        self.history.push(ChatTurn::new(Role::User, message));
        debug!("User turn {}", self.history.len());

        let reply = self.pipeline.respond(message).await;
        let mut content = reply.answer;
        if self.show_sources && self.pipeline.has_index() {
            content.push_str("\n\n");
            content.push_str(&format_sources(&reply.sources));
        }

        self.history.push(ChatTurn::new(Role::Assistant, content.clone()));
        content
    }

    /// The history as `[role] content` blocks separated by blank lines.
    pub fn format_history(&self) -> String {
        self.history
            .iter()
            .map(|turn| format!("[{}] {}", turn.role.as_str(), turn.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Read questions from `input` until end of input or `/quit`, writing
    /// replies to `output`.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output
            .write_all(format!("{WELCOME_MESSAGE}\n\n").as_bytes())
            .await?;
        let mut lines = input.lines();

        loop {
            output.write_all(format!("{INPUT_PROMPT}\n> ").as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_command(line) {
                Some(Command::Quit) => break,
                Some(Command::History) => {
                    output
                        .write_all(format!("{}\n\n", self.format_history()).as_bytes())
                        .await?;
                }
                None => {
                    output
                        .write_all(format!("{THINKING_MESSAGE}\n").as_bytes())
                        .await?;
                    output.flush().await?;
                    let reply = self.send(line).await;
                    output.write_all(format!("\n{reply}\n\n").as_bytes()).await?;
                }
            }
        }

        info!("Chat session ended after {} turn(s)", self.history.len());
        output
            .write_all(format!("{GOODBYE_MESSAGE}\n").as_bytes())
            .await?;
        output.flush().await
    }
}

//! Sending a validated card somewhere: a local text file or an email.
//!
//! The UI calls a [`Dispatcher`] after [`validate_record`] succeeds. The
//! dispatcher never fails outright; every path ends in a
//! [`DispatchOutcome`] that says whether the requested delivery happened and
//! where a copy was written. When email is not configured, or the transport
//! fails, the card is written to the fallback file instead.
//!
//! All operations are plain futures: dropping one cancels it. No timeout or
//! retry policy is applied here.
//!
//! [`validate_record`]: crate::validate::validate_record

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::card::CardRecord;
use crate::clock::{Clock, SystemClock};
use crate::export::render_export;

/// Where a card should be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Append the export document to a local file.
    File(PathBuf),
    /// Email the card to this address.
    Email(String),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Email(address) => write!(f, "email {}", address),
        }
    }
}

/// Proof that a sender delivered a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentConfirmation {
    /// Where the card went.
    pub destination: Destination,
    /// Message suitable for a notification toast.
    pub message: String,
}

/// Errors that can occur while sending a card.
#[derive(Debug)]
pub enum SendError {
    /// Writing the export file failed.
    Io(io::Error),
    /// The sender cannot deliver to this kind of destination.
    Unsupported {
        /// Name of the sender.
        sender: &'static str,
        /// The rejected destination.
        destination: Destination,
    },
    /// The email transport reported a failure.
    Transport(String),
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to write card file: {}", e),
            Self::Unsupported {
                sender,
                destination,
            } => write!(f, "{} cannot deliver to {}", sender, destination),
            Self::Transport(msg) => write!(f, "email transport failed: {}", msg),
        }
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SendError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// An asynchronous capability that delivers a card record.
#[async_trait]
pub trait RecordSender: Send + Sync {
    /// Delivers `record` to `destination`.
    async fn send_record(
        &self,
        record: &CardRecord,
        destination: &Destination,
    ) -> Result<SentConfirmation, SendError>;
}

/// Appends the export document to a local file.
#[derive(Debug, Clone, Default)]
pub struct FileSender<C = SystemClock> {
    clock: C,
}

impl FileSender {
    /// Creates a file sender stamped with the system clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> FileSender<C> {
    /// Creates a file sender stamped with `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    async fn append(&self, record: &CardRecord, path: &Path) -> Result<(), SendError> {
        let document = render_export(record, self.clock.now());

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        // Blank line between entries
        if file.metadata().await?.len() > 0 {
            file.write_all(b"\n").await?;
        }
        file.write_all(document.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> RecordSender for FileSender<C> {
    async fn send_record(
        &self,
        record: &CardRecord,
        destination: &Destination,
    ) -> Result<SentConfirmation, SendError> {
        let Destination::File(path) = destination else {
            return Err(SendError::Unsupported {
                sender: "file sender",
                destination: destination.clone(),
            });
        };

        self.append(record, path).await?;
        tracing::info!(
            card = %record.masked_number(),
            path = %path.display(),
            "card saved to file"
        );

        Ok(SentConfirmation {
            destination: destination.clone(),
            message: format!("Card information was saved to {}", path.display()),
        })
    }
}

/// An email transport that only pretends to send.
///
/// It waits for `latency` to model the network round trip, then either
/// confirms or fails with the configured reason.
#[derive(Debug, Clone, Default)]
pub struct SimulatedEmail {
    latency: Duration,
    failure: Option<String>,
}

impl SimulatedEmail {
    /// Creates a transport that succeeds after `latency`.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure: None,
        }
    }

    /// Makes every send fail with `reason` after the latency.
    #[must_use]
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }
}

#[async_trait]
impl RecordSender for SimulatedEmail {
    async fn send_record(
        &self,
        record: &CardRecord,
        destination: &Destination,
    ) -> Result<SentConfirmation, SendError> {
        let Destination::Email(address) = destination else {
            return Err(SendError::Unsupported {
                sender: "email transport",
                destination: destination.clone(),
            });
        };

        tracing::debug!(latency_ms = self.latency.as_millis() as u64, "simulating email send");
        tokio::time::sleep(self.latency).await;

        if let Some(reason) = &self.failure {
            return Err(SendError::Transport(reason.clone()));
        }

        tracing::info!(card = %record.masked_number(), to = %address, "card emailed");
        Ok(SentConfirmation {
            destination: destination.clone(),
            message: format!("Card information was sent to {}", address),
        })
    }
}

/// The result reported back to the UI after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// True if the card reached a destination without an error being
    /// reported to the user.
    pub success: bool,
    /// Message suitable for a notification toast.
    pub message: String,
    /// The file a copy was written to, if any.
    pub saved_to: Option<PathBuf>,
}

/// Routes a card to its destination, falling back to a local file.
///
/// # Example
///
/// ```no_run
/// use card_vault::dispatch::{Destination, Dispatcher};
/// use card_vault::CardRecord;
///
/// # async fn run() {
/// let dispatcher = Dispatcher::new("my_cards.txt");
/// let record = CardRecord::from_raw("4111111111111111", "Jane Doe", "1230", "123");
///
/// // No email transport configured: the card lands in my_cards.txt
/// let outcome = dispatcher
///     .dispatch(&record, &Destination::Email("jane@example.com".into()))
///     .await;
/// assert!(outcome.success);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher<T = SimulatedEmail, C = SystemClock> {
    transport: Option<T>,
    file: FileSender<C>,
    fallback_path: PathBuf,
}

impl Dispatcher {
    /// Creates a dispatcher with no email transport that falls back to
    /// `fallback_path`.
    pub fn new(fallback_path: impl Into<PathBuf>) -> Self {
        Self {
            transport: None,
            file: FileSender::new(),
            fallback_path: fallback_path.into(),
        }
    }
}

impl<T, C> Dispatcher<T, C>
where
    T: RecordSender,
    C: Clock + Send + Sync,
{
    /// Uses `transport` for email destinations.
    pub fn with_transport<U: RecordSender>(self, transport: U) -> Dispatcher<U, C> {
        Dispatcher {
            transport: Some(transport),
            file: self.file,
            fallback_path: self.fallback_path,
        }
    }

    /// Stamps exported files with `clock`.
    pub fn with_clock<D: Clock + Send + Sync>(self, clock: D) -> Dispatcher<T, D> {
        Dispatcher {
            transport: self.transport,
            file: FileSender::with_clock(clock),
            fallback_path: self.fallback_path,
        }
    }

    /// The file used when email is unavailable.
    #[inline]
    pub fn fallback_path(&self) -> &Path {
        &self.fallback_path
    }

    /// Delivers `record` to `destination`.
    pub async fn dispatch(&self, record: &CardRecord, destination: &Destination) -> DispatchOutcome {
        match destination {
            Destination::File(path) => match self.file.send_record(record, destination).await {
                Ok(confirmation) => DispatchOutcome {
                    success: true,
                    message: confirmation.message,
                    saved_to: Some(path.clone()),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "saving card failed");
                    DispatchOutcome {
                        success: false,
                        message: format!("Could not save card information ({})", e),
                        saved_to: None,
                    }
                }
            },
            Destination::Email(_) => self.dispatch_email(record, destination).await,
        }
    }

    async fn dispatch_email(&self, record: &CardRecord, destination: &Destination) -> DispatchOutcome {
        let Some(transport) = &self.transport else {
            tracing::warn!("email transport not configured, saving card to file instead");
            return match self.save_fallback(record).await {
                Ok(path) => DispatchOutcome {
                    success: true,
                    message: format!(
                        "Card information was saved to a text file. Check {}.",
                        path.display()
                    ),
                    saved_to: Some(path),
                },
                Err(e) => DispatchOutcome {
                    success: false,
                    message: format!("Could not save card information ({})", e),
                    saved_to: None,
                },
            };
        };

        match transport.send_record(record, destination).await {
            Ok(confirmation) => DispatchOutcome {
                success: true,
                message: confirmation.message,
                saved_to: None,
            },
            Err(send_err) => {
                tracing::warn!(error = %send_err, "email failed, saving card to file instead");
                match self.save_fallback(record).await {
                    Ok(path) => DispatchOutcome {
                        success: false,
                        message: format!(
                            "Could not send email ({}). Card information saved as a text file instead.",
                            send_err
                        ),
                        saved_to: Some(path),
                    },
                    Err(file_err) => DispatchOutcome {
                        success: false,
                        message: format!(
                            "Could not send email ({}) or save card information ({})",
                            send_err, file_err
                        ),
                        saved_to: None,
                    },
                }
            }
        }
    }

    async fn save_fallback(&self, record: &CardRecord) -> Result<PathBuf, SendError> {
        let destination = Destination::File(self.fallback_path.clone());
        self.file.send_record(record, &destination).await?;
        Ok(self.fallback_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use tempfile::TempDir;

    fn record() -> CardRecord {
        CardRecord::from_raw("4111111111111111", "Jane Doe", "1230", "123")
    }

    fn clock() -> FixedClock {
        FixedClock::on(2025, 1, 15).unwrap()
    }

    #[tokio::test]
    async fn test_file_sender_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cards.txt");
        let sender = FileSender::with_clock(clock());
        let destination = Destination::File(path.clone());

        sender.send_record(&record(), &destination).await.unwrap();
        sender.send_record(&record(), &destination).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents.matches("Card Information:").count(), 2);
        assert!(contents.contains("Generated on: 2025-01-15 00:00:00"));
        assert!(contents.contains("\n\nCard Information:"));
    }

    #[tokio::test]
    async fn test_file_sender_rejects_email() {
        let sender = FileSender::with_clock(clock());
        let err = sender
            .send_record(&record(), &Destination::Email("a@b.co".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn test_file_sender_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("cards.txt");
        let sender = FileSender::with_clock(clock());
        let err = sender
            .send_record(&record(), &Destination::File(path))
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::Io(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_email() {
        let transport = SimulatedEmail::new(Duration::from_millis(500));
        let confirmation = transport
            .send_record(&record(), &Destination::Email("jane@example.com".into()))
            .await
            .unwrap();
        assert_eq!(confirmation.message, "Card information was sent to jane@example.com");
    }

    #[tokio::test]
    async fn test_dispatch_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cards.txt");
        let dispatcher = Dispatcher::new(dir.path().join("fallback.txt")).with_clock(clock());

        let outcome = dispatcher
            .dispatch(&record(), &Destination::File(path.clone()))
            .await;
        assert!(outcome.success);
        assert_eq!(outcome.saved_to, Some(path.clone()));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_dispatch_email_without_transport_falls_back() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join("my_cards.txt");
        let dispatcher = Dispatcher::new(&fallback).with_clock(clock());

        let outcome = dispatcher
            .dispatch(&record(), &Destination::Email("jane@example.com".into()))
            .await;
        assert!(outcome.success);
        assert_eq!(outcome.saved_to, Some(fallback.clone()));
        assert!(outcome.message.contains("saved to a text file"));
        assert!(fallback.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_email_success() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join("my_cards.txt");
        let dispatcher = Dispatcher::new(&fallback)
            .with_clock(clock())
            .with_transport(SimulatedEmail::new(Duration::from_secs(1)));

        let outcome = dispatcher
            .dispatch(&record(), &Destination::Email("jane@example.com".into()))
            .await;
        assert!(outcome.success);
        assert_eq!(outcome.saved_to, None);
        assert!(!fallback.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_email_failure_falls_back() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join("my_cards.txt");
        let dispatcher = Dispatcher::new(&fallback)
            .with_clock(clock())
            .with_transport(SimulatedEmail::new(Duration::ZERO).failing("relay offline"));

        let outcome = dispatcher
            .dispatch(&record(), &Destination::Email("jane@example.com".into()))
            .await;
        assert!(!outcome.success);
        assert!(outcome.message.contains("relay offline"));
        assert_eq!(outcome.saved_to, Some(fallback.clone()));
        assert!(fallback.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_dispatch_cancels_it() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join("my_cards.txt");
        let dispatcher = Dispatcher::new(&fallback)
            .with_clock(clock())
            .with_transport(SimulatedEmail::new(Duration::from_secs(60)).failing("late"));

        let record = record();
        let destination = Destination::Email("jane@example.com".into());
        let result = tokio::time::timeout(
            Duration::from_millis(10),
            dispatcher.dispatch(&record, &destination),
        )
        .await;

        assert!(result.is_err());
        // Cancelled before the transport failed, so no fallback file
        assert!(!fallback.exists());
    }

    #[test]
    fn test_send_error_display() {
        let err = SendError::Unsupported {
            sender: "file sender",
            destination: Destination::Email("a@b.co".into()),
        };
        assert_eq!(err.to_string(), "file sender cannot deliver to email a@b.co");
        assert_eq!(
            SendError::Transport("boom".into()).to_string(),
            "email transport failed: boom"
        );
    }
}

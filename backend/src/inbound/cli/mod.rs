//! Command-line adapter.
//!
//! Each subcommand drives one of the domain flows end to end against either
//! the PostgreSQL store or the in-process store seeded from a JSON file.
//! Notifications are written to standard error; results go to the writer
//! handed to [`execute`].

mod files;
mod output;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::domain::ports::{
    BookingRepository, MentorRepository, NotificationSink, SessionProvider,
};
use crate::domain::{
    BookingOrchestrator, BookingOutcome, Error, Mentor, MentorDirectoryService, MentorId,
    MentorProfileInput, MentorRegistrationFlow, MentorRegistrationService, RegistrationOutcome,
    Slot, SlotRegistryService, normalise_slot,
};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::notifications::ConsoleNotificationSink;
use crate::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselMentorRepository, PoolConfig, PoolError,
};
use crate::outbound::session::StaticSessionProvider;
use crate::settings::MentorshipSettings;

pub use self::files::read_json;

/// `mentorship` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mentorship",
    about = "Browse mentors, book mentoring slots and register as a mentor",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List mentors open for bookings.
    Mentors,
    /// Reserve a slot with a mentor.
    ///
    /// Without a database URL the booking is held in this process only and
    /// is gone once it exits.
    Book {
        /// Mentor account id.
        #[arg(long, value_name = "id", value_parser = parse_mentor_id)]
        mentor: MentorId,
        /// Slot start as an RFC 3339 timestamp.
        #[arg(long, value_name = "timestamp", value_parser = parse_slot)]
        slot: Slot,
    },
    /// List your bookings.
    ///
    /// Without a database URL the store is rebuilt from the seed file on
    /// every run, so bookings made by earlier runs are not listed.
    Bookings,
    /// Register the signed-in account as a mentor.
    ///
    /// Without a database URL the profile is held in this process only and
    /// is gone once it exits.
    Register {
        /// JSON document with the profile fields.
        #[arg(long, value_name = "path")]
        profile: PathBuf,
        /// Additional slots to offer, as RFC 3339 timestamps.
        #[arg(long = "slot", value_name = "timestamp", value_parser = parse_slot)]
        slots: Vec<Slot>,
    },
}

fn parse_mentor_id(value: &str) -> Result<MentorId, String> {
    MentorId::new(value).map_err(|err| err.to_string())
}

fn parse_slot(value: &str) -> Result<Slot, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|slot| normalise_slot(slot.with_timezone(&Utc)))
        .map_err(|err| format!("invalid RFC 3339 timestamp: {err}"))
}

/// Failures surfaced by the command-line adapter.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Domain(#[from] Error),
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("database pool unavailable: {0}")]
    Pool(#[from] PoolError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Collaborators shared by every subcommand.
pub struct CliContext<M, B> {
    pub mentors: Arc<M>,
    pub bookings: Arc<B>,
    pub session: Arc<dyn SessionProvider>,
    pub notifications: Arc<dyn NotificationSink>,
    pub clock: Arc<dyn Clock>,
}

impl<M, B> CliContext<M, B>
where
    M: MentorRepository,
    B: BookingRepository,
{
    fn booking_flow(
        &self,
    ) -> BookingOrchestrator<
        dyn SessionProvider,
        MentorDirectoryService<M>,
        SlotRegistryService<B>,
        dyn NotificationSink,
    > {
        BookingOrchestrator::new(
            Arc::clone(&self.session),
            Arc::new(MentorDirectoryService::new(Arc::clone(&self.mentors))),
            Arc::new(SlotRegistryService::new(
                Arc::clone(&self.bookings),
                Arc::clone(&self.clock),
            )),
            Arc::clone(&self.notifications),
        )
    }

    fn registration_flow(
        &self,
    ) -> MentorRegistrationFlow<dyn SessionProvider, MentorRegistrationService<M>, dyn NotificationSink>
    {
        MentorRegistrationFlow::new(
            Arc::clone(&self.session),
            Arc::new(MentorRegistrationService::new(Arc::clone(&self.mentors))),
            Arc::clone(&self.notifications),
        )
    }
}

/// Run one subcommand, writing its result to `out`.
///
/// # Errors
///
/// Domain failures are returned after their notification has been raised.
pub async fn execute<M, B>(
    command: Command,
    context: &CliContext<M, B>,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    M: MentorRepository,
    B: BookingRepository,
{
    match command {
        Command::Mentors => {
            let flow = context.booking_flow();
            flow.start().await?;
            let mentors = flow.view().mentors.unwrap_or_default();
            output::write_mentors(out, &mentors)?;
        }
        Command::Book { mentor, slot } => {
            let flow = context.booking_flow();
            flow.start().await?;
            flow.select_mentor(&mentor)?;
            flow.select_slot(slot)?;
            match flow.confirm_booking().await {
                BookingOutcome::Confirmed(booking) => output::write_booking(out, &booking)?,
                BookingOutcome::Failed(error) => return Err(error.into()),
                BookingOutcome::NothingSelected => {
                    return Err(Error::internal("slot selection was lost before booking").into());
                }
            }
        }
        Command::Bookings => {
            let flow = context.booking_flow();
            flow.start().await?;
            output::write_bookings(out, &flow.view().my_bookings)?;
        }
        Command::Register { profile, slots } => {
            let input: MentorProfileInput = read_json(&profile)?;
            let flow = context.registration_flow();
            for slot in slots {
                flow.add_slot(slot);
            }
            match flow.submit(input).await? {
                RegistrationOutcome::Registered(mentor) => {
                    output::write_registration(out, &mentor)?;
                }
                RegistrationOutcome::AlreadySubmitting => {
                    return Err(Error::internal("a registration is already in flight").into());
                }
            }
        }
    }
    Ok(())
}

/// Wire the configured store and run `cli` against it, printing to stdout.
///
/// # Errors
///
/// Fails when the store cannot be reached or the command fails.
pub async fn run(cli: Cli, settings: &MentorshipSettings) -> Result<(), CliError> {
    let session: Arc<dyn SessionProvider> = Arc::new(StaticSessionProvider::new(
        settings.account_id.clone(),
        settings.role(),
        settings.access_token.clone(),
    ));
    let notifications: Arc<dyn NotificationSink> = Arc::new(ConsoleNotificationSink);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let mut stdout = io::stdout().lock();

    if let Some(database_url) = settings.database_url() {
        let mut config = PoolConfig::new(database_url);
        if let Some(max_size) = settings.pool_max_size {
            config = config.with_max_size(max_size);
        }
        let pool = DbPool::new(config).await?;
        info!("using PostgreSQL store");
        let context = CliContext {
            mentors: Arc::new(DieselMentorRepository::new(pool.clone())),
            bookings: Arc::new(DieselBookingRepository::new(pool)),
            session,
            notifications,
            clock,
        };
        return execute(cli.command, &context, &mut stdout).await;
    }

    let seed_path = settings.seed_path();
    let mentors: Vec<Mentor> = read_json(&seed_path)?;
    info!(path = %seed_path.display(), count = mentors.len(), "using in-process store");
    let store = Arc::new(InMemoryStore::seeded(mentors));
    let context = CliContext {
        mentors: Arc::clone(&store),
        bookings: store,
        session,
        notifications,
        clock,
    };
    execute(cli.command, &context, &mut stdout).await
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

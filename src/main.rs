//! DeliverEase widget - terminal entry point
//!
//! Reads phone numbers from stdin and runs each through the lookup flow.
//! Standalone mode renders toasts and the manual-entry form on stdout.
//! Embedded mode (`DELIVEREASE_EMBEDDED=true`) posts messages to the host
//! process as JSON lines on stdout and keeps its own text on stderr.

use anyhow::Result;
use deliverease_widget::bridge::{JsonLinesTarget, TerminalUi};
use deliverease_widget::{
    AsyncLookupClientImpl, FrameContext, LocalUi, LookupClient, LookupOutcome, ManualEntryError,
    ManualField, Metrics, WidgetConfig, WidgetController, WidgetError, WidgetParts,
};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn prompt(text: &str) {
    eprint!("{}", text);
    let _ = io::stderr().flush();
}

fn field_prompt(field: ManualField) -> &'static str {
    match field {
        ManualField::FullName => "Full name: ",
        ManualField::Address => "Address: ",
        ManualField::PostalCode => "Postal code: ",
        ManualField::City => "City: ",
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = match WidgetConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize logging (stderr only; stdout carries posted messages)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Configuration loaded successfully");
    let catalog = config.catalog()?;

    info!("Starting DeliverEase widget with API URL: {}", config.api_url);

    let context = FrameContext::detect(config.embedded);
    let metrics = Metrics::new();
    let client = LookupClient::new(&config, metrics.clone());
    let ui: Arc<dyn LocalUi> = match context {
        FrameContext::Embedded => Arc::new(TerminalUi::new(io::stderr())),
        FrameContext::Standalone => Arc::new(TerminalUi::new(io::stdout())),
    };

    let widget = WidgetController::new(
        context,
        &config,
        catalog,
        WidgetParts {
            client: Arc::new(AsyncLookupClientImpl::new(client)),
            parent: Arc::new(JsonLinesTarget::stdout()),
            ui,
            metrics,
        },
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut next_field: Option<usize> = None;
    prompt("Phone number (8 digits, or 'manual'): ");

    while let Some(line) = lines.next_line().await? {
        if let Some(index) = next_field {
            let field = ManualField::ALL[index];
            if field == ManualField::FullName && line.trim().is_empty() {
                widget.cancel_manual_entry()?;
                next_field = None;
                prompt("Phone number (8 digits, or 'manual'): ");
                continue;
            }

            widget.set_manual_field(field, &line)?;
            if index + 1 < ManualField::ALL.len() {
                next_field = Some(index + 1);
                prompt(field_prompt(ManualField::ALL[index + 1]));
                continue;
            }

            match widget.submit_manual_entry() {
                Ok(_) => next_field = None,
                Err(WidgetError::ManualEntry(ManualEntryError::MissingField(name))) => {
                    eprintln!("Please fill in {}", name);
                    let retry = ManualField::ALL
                        .iter()
                        .position(|f| f.name() == name)
                        .unwrap_or(0);
                    next_field = Some(retry);
                    prompt(field_prompt(ManualField::ALL[retry]));
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
            prompt("Phone number (8 digits, or 'manual'): ");
            continue;
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("manual") {
            match widget.open_manual_entry() {
                Ok(()) => {
                    next_field = Some(0);
                    prompt(field_prompt(ManualField::FullName));
                }
                Err(e) => {
                    eprintln!("{}", e);
                    prompt("Phone number (8 digits, or 'manual'): ");
                }
            }
            continue;
        }

        let state = widget.on_input(line);
        if state.changed {
            eprintln!("Using {}", state.value);
        }
        if !state.submit_enabled {
            eprintln!("A phone number has exactly 8 digits");
            prompt("Phone number (8 digits, or 'manual'): ");
            continue;
        }

        let outcome = widget.submit().await?;
        if let LookupOutcome::Success(address) = &outcome {
            if !context.is_embedded() {
                if let Some(code) = address.info().postal_code() {
                    match widget.check_delivery(&code).await {
                        Ok(availability) if availability.serviceable => {
                            for option in &availability.delivery_options {
                                println!("  {}", option);
                            }
                        }
                        Ok(availability) => {
                            println!("  {}", availability.message.unwrap_or_default());
                        }
                        Err(e) => error!("Delivery check failed: {}", e),
                    }
                }
            }
        }

        if widget.manual_entry().is_some() {
            next_field = Some(0);
            prompt(field_prompt(ManualField::FullName));
        } else {
            prompt("Phone number (8 digits, or 'manual'): ");
        }
    }

    let summary = widget.metrics().summary();
    info!(
        "Shutting down: {} lookups ok, {} rate limited, {} timed out, {} failed, {} manual entries",
        summary.lookups_success,
        summary.lookups_rate_limited,
        summary.lookups_timed_out,
        summary.lookups_failed,
        summary.manual_entries_submitted
    );
    Ok(())
}

//! History commands: list, show, delete and summary.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;

use super::AppContext;
use crate::cli::HistoryAction;
use crate::history::HistoryStore;
use crate::presenter::{DeleteOutcome, HistoryPresenter};

pub(super) fn run_history(ctx: &AppContext, action: HistoryAction) -> anyhow::Result<ExitCode> {
    let history = Arc::new(HistoryStore::new(ctx.store.clone()));
    let mut presenter = HistoryPresenter::new(history.clone());
    presenter.refresh();

    match action {
        HistoryAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(presenter.records())?);
            } else if let Some(message) = presenter.empty_message() {
                println!("{}", message);
            } else {
                for row in presenter.rows() {
                    println!(
                        "{}  {}  [{}] {} - {}",
                        row.id, row.date, row.badge, row.name, row.description
                    );
                }
            }
            info!("Listed {} scans", presenter.records().len());
            Ok(ExitCode::SUCCESS)
        }
        HistoryAction::Show { id } => match presenter.select(&id) {
            Some(detail) => {
                println!("Wound Name:  {}", detail.name);
                println!("Severity:    {} [{}]", detail.severity, detail.tier.badge());
                println!("Date:        {}", detail.date);
                println!("Description: {}", detail.description);
                println!("Image:       {}", detail.uri);
                println!("Id:          {}", detail.id);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("No scan with id {}", id);
                Ok(ExitCode::FAILURE)
            }
        },
        HistoryAction::Delete { id, yes } => {
            let prompter = AppContext::prompter(yes);
            match presenter.delete(&id, prompter.as_ref())? {
                DeleteOutcome::Deleted => {
                    println!("Deleted {}.", id);
                    if let Some(message) = presenter.empty_message() {
                        println!("{}", message);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                DeleteOutcome::Cancelled => {
                    println!("Kept {}.", id);
                    Ok(ExitCode::SUCCESS)
                }
                DeleteOutcome::NotFound => {
                    eprintln!("No scan with id {}", id);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        HistoryAction::Summary { json } => {
            let summary = history.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(ExitCode::SUCCESS);
            }

            println!("Total scans: {}", summary.total);
            println!("Healthy:     {}", summary.healthy);
            println!("Diagnosed:   {}", summary.diagnosed);
            match &summary.latest {
                Some(latest) => println!("Last scan:   {} ({})", latest.name, latest.date),
                None => println!("Last scan:   none"),
            }
            for record in &summary.recent {
                println!("  {}  {}  {}", record.date, record.name, record.severity);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

//! Interactive browse loop.
//!
//! Reads line commands from stdin, turns them into view events, drives the
//! pure state machine in `facman_core::state`, and executes any command it
//! emits against the API. Rendering always re-fetches from the server, so the
//! screen reflects whatever was just persisted.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use facman_core::state::{
  Command, DraftField, Screen, ViewEvent, ViewState, transition,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use uuid::Uuid;

use crate::{client::ApiClient, render};

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Action {
  Event(ViewEvent),
  Refresh,
  Help,
  Quit,
}

const HELP: &str = "\
commands:
  dash                      dashboard
  type <CODE>               facilities for one equipment code
  legal                     legal inspection report
  analysis                  lifespan analysis
  edit <ID>                 start editing a facility
  set <field> <value>       stage a field of the current edit; fields are
                            name, location, manager, remarks, and the dates
                            last and next (YYYY-MM-DD)
  submit                    persist the staged edit
  cancel                    drop the staged edit
  refresh                   redraw the current screen
  quit";

/// Parse one input line. `Err` carries a usage message for the user.
fn parse(line: &str) -> Result<Action, String> {
  let line = line.trim();
  let (word, rest) = match line.split_once(char::is_whitespace) {
    Some((w, r)) => (w, r.trim()),
    None => (line, ""),
  };

  match word {
    "dash" | "dashboard" => Ok(Action::Event(ViewEvent::BackToDashboard)),
    "legal" => Ok(Action::Event(ViewEvent::OpenLegalInspection)),
    "analysis" => Ok(Action::Event(ViewEvent::OpenAnalysis)),
    "type" if !rest.is_empty() => {
      Ok(Action::Event(ViewEvent::SelectEquipment(rest.to_uppercase())))
    }
    "type" => Err("usage: type <CODE>".to_string()),
    "edit" => {
      let id: Uuid = rest
        .parse()
        .map_err(|_| format!("not a facility id: {rest:?}"))?;
      Ok(Action::Event(ViewEvent::BeginEdit(id)))
    }
    "set" => parse_set(rest).map(|f| Action::Event(ViewEvent::UpdateDraft(f))),
    "submit" => Ok(Action::Event(ViewEvent::SubmitEdit)),
    "cancel" => Ok(Action::Event(ViewEvent::CancelEdit)),
    "refresh" => Ok(Action::Refresh),
    "help" | "?" => Ok(Action::Help),
    "quit" | "q" | "exit" => Ok(Action::Quit),
    "" => Ok(Action::Refresh),
    other => Err(format!("unknown command {other:?} (try: help)")),
  }
}

fn parse_set(rest: &str) -> Result<DraftField, String> {
  let (field, value) = rest
    .split_once(char::is_whitespace)
    .map(|(f, v)| (f, v.trim()))
    .ok_or_else(|| "usage: set <field> <value>".to_string())?;
  if value.is_empty() {
    return Err("usage: set <field> <value>".to_string());
  }

  match field {
    "name" => Ok(DraftField::FacilityName(value.to_string())),
    "location" => Ok(DraftField::InstallLocation(value.to_string())),
    "manager" => Ok(DraftField::Manager(value.to_string())),
    "remarks" => Ok(DraftField::Remarks(value.to_string())),
    "last" => parse_date(value).map(DraftField::LastInspectionDate),
    "next" => parse_date(value).map(DraftField::NextInspectionDate),
    other => Err(format!("unknown field {other:?}")),
  }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .map_err(|_| format!("not a date (YYYY-MM-DD): {value:?}"))
}

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App {
  client: ApiClient,
  state:  ViewState,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self { client, state: ViewState::default() }
  }

  /// Run the read-parse-transition loop until `quit` or EOF.
  pub async fn run(&mut self) -> Result<()> {
    self.render_screen().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
      stdout.write_all(b"> ").await?;
      stdout.flush().await?;

      let Some(line) = lines.next_line().await.context("reading stdin")? else {
        break;
      };

      match parse(&line) {
        Ok(Action::Quit) => break,
        Ok(Action::Help) => println!("{HELP}"),
        Ok(Action::Refresh) => self.render_screen().await?,
        Ok(Action::Event(event)) => self.apply(event).await?,
        Err(msg) => println!("{msg}"),
      }
    }

    Ok(())
  }

  /// Feed one event through the state machine, execute any emitted command,
  /// and redraw when the event changed what is on screen.
  async fn apply(&mut self, event: ViewEvent) -> Result<()> {
    let screen_before = self.state.screen.clone();
    let state = std::mem::take(&mut self.state);
    let (state, command) = transition(state, event);
    self.state = state;

    match command {
      Some(Command::PersistEdit(edit)) => {
        let updated = self
          .client
          .update(edit.facility_id, &edit.draft)
          .await
          .context("persisting edit")?;
        println!("saved {}", updated.record.facility.facility_code);
        self.render_screen().await?;
      }
      None => {
        if self.state.screen != screen_before {
          self.render_screen().await?;
        } else if let Some(editing) = &self.state.editing {
          let staged = serde_json::to_string(&editing.draft)
            .context("serialising staged draft")?;
          println!("editing {}, staged: {staged}", editing.facility_id);
        }
      }
    }

    Ok(())
  }

  async fn render_screen(&self) -> Result<()> {
    match &self.state.screen {
      Screen::Dashboard => {
        let report = self.client.dashboard().await?;
        render::dashboard(&report);
      }
      Screen::FacilityList(code) => {
        let list = self.client.facilities(Some(code)).await?;
        render::facilities(&list);
      }
      Screen::LegalInspection => {
        let report = self.client.legal().await?;
        render::legal(&report);
      }
      Screen::Analysis => {
        let report = self.client.analysis().await?;
        render::analysis(&report);
      }
    }
    Ok(())
  }
}

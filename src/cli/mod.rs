//! Terminal front-end for the questionnaire.
//!
//! Stands in for the form interface: it gathers selections from arguments
//! or interactive prompts, runs the matching assessment and prints the
//! verdict as text or JSON. Prompts go to stderr so stdout only ever
//! carries the result.

pub mod prompt;
pub mod render;

use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

use crate::assessor::Assessor;
use crate::config::{ConfigError, Policy};
use crate::inheritance::{self, FamilyHistory, Relation};
use crate::triage::{FlagCategory, FlagTier};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown symptom: {0:?} (see `mathealth symptoms`)")]
    UnknownSymptom(String),

    #[error("Unknown question: {0:?}")]
    UnknownQuestion(String),

    #[error("Unknown condition for {relation}: {condition:?} (see `mathealth conditions`)")]
    UnknownCondition {
        relation: &'static str,
        condition: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "mathealth")]
#[command(version)]
#[command(about = "Pregnancy danger-sign triage, early pregnancy likelihood and inherited risk", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Policy file (JSON). Defaults to ~/MatHealth/policy.json when present.
    #[arg(long, global = true)]
    pub policy: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the selectable danger signs by tier and category
    Symptoms,

    /// List the selectable inherited conditions
    Conditions,

    /// Classify reported danger signs
    Triage {
        /// A symptom exactly as listed by `symptoms` (repeatable)
        #[arg(short, long = "symptom")]
        symptoms: Vec<String>,
    },

    /// Score early pregnancy signs; prompts for each question when no --yes is given
    Likelihood {
        /// A question answered "yes" (repeatable)
        #[arg(long = "yes")]
        yes: Vec<String>,
    },

    /// Estimate inherited condition risk from family history
    Inherited {
        /// Mother's conditions, comma separated
        #[arg(long, default_value = "")]
        mother: String,

        /// Father's conditions, comma separated
        #[arg(long, default_value = "")]
        father: String,

        /// Maternal grandparents' conditions, comma separated
        #[arg(long, default_value = "")]
        maternal_grandparents: String,

        /// Paternal grandparents' conditions, comma separated
        #[arg(long, default_value = "")]
        paternal_grandparents: String,
    },
}

#[derive(Serialize)]
struct TierListing<'a> {
    tier: FlagTier,
    categories: &'a [FlagCategory],
}

/// Resolve the policy and run the command against the real terminal.
pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let policy = Policy::resolve(cli.policy.as_deref())?;
    let assessor = Assessor::with_policy(policy)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(
        &cli,
        &assessor,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

/// Run one command. `input`/`prompts` are only used by interactive commands.
pub fn execute<R, W, P>(
    cli: &Cli,
    assessor: &Assessor,
    input: &mut R,
    out: &mut W,
    prompts: &mut P,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
    P: Write,
{
    match &cli.command {
        Command::Symptoms => {
            let table = assessor.flags();
            let listing: Vec<TierListing<'_>> = FlagTier::ALL
                .iter()
                .map(|tier| TierListing {
                    tier: *tier,
                    categories: table.tier(*tier),
                })
                .collect();
            emit(cli.format, &listing, || render::symptoms(table), out)
        }
        Command::Conditions => emit(
            cli.format,
            &inheritance::CONDITIONS,
            || render::conditions(inheritance::CONDITIONS),
            out,
        ),
        Command::Triage { symptoms } => {
            if let Some(unknown) = symptoms
                .iter()
                .find(|s| assessor.flags().tier_of(s).is_none())
            {
                return Err(CliError::UnknownSymptom(unknown.clone()));
            }
            let reported: HashSet<&str> = symptoms.iter().map(String::as_str).collect();
            let verdict = assessor.classify(&reported);
            emit(cli.format, &verdict, || render::triage(&verdict), out)
        }
        Command::Likelihood { yes } => {
            let answers = if yes.is_empty() {
                prompt::ask_all(assessor.questions().questions(), input, prompts)?
            } else {
                if let Some(unknown) = yes
                    .iter()
                    .find(|q| assessor.questions().weight(q).is_none())
                {
                    return Err(CliError::UnknownQuestion(unknown.clone()));
                }
                yes.iter().map(|q| (q.clone(), true)).collect()
            };
            let verdict = assessor.score(answers);
            emit(cli.format, &verdict, || render::likelihood(&verdict), out)
        }
        Command::Inherited {
            mother,
            father,
            maternal_grandparents,
            paternal_grandparents,
        } => {
            let history: FamilyHistory = [
                (Relation::Mother, mother),
                (Relation::Father, father),
                (Relation::MaternalGrandparents, maternal_grandparents),
                (Relation::PaternalGrandparents, paternal_grandparents),
            ]
            .into_iter()
            .map(|(relation, raw)| (relation, prompt::parse_list(raw)))
            .filter(|(_, conditions)| !conditions.is_empty())
            .collect();
            for (relation, conditions) in &history {
                if let Some(unknown) = conditions
                    .iter()
                    .find(|c| !inheritance::CONDITIONS.contains(&c.as_str()))
                {
                    return Err(CliError::UnknownCondition {
                        relation: relation.as_str(),
                        condition: unknown.clone(),
                    });
                }
            }
            let risk = assessor.predict(&history);
            emit(cli.format, &risk, || render::risk_chart(&risk), out)
        }
    }
}

fn emit<T, F, W>(format: OutputFormat, value: &T, text: F, out: &mut W) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
    W: Write,
{
    match format {
        OutputFormat::Text => out.write_all(text().as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

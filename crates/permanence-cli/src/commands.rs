use serde::Serialize;
use serde_json::{Map, Value};

use permanence_core::models::form::{FormDocument, FormTemplate};
use permanence_core::paths::{form_id_from_name, IdStyle};
use permanence_rules::status::{answer_statuses, AnswerStatus};
use permanence_rules::{
    form_status, question_status, render_summary_with, FormStatus, QuestionStatus, SummaryLabels,
};
use permanence_storage::forms::{append_answers, create_form, list_forms, load_templates};
use permanence_storage::{DocumentStore, LocalStore, StoreConfig};

use crate::{Cli, Command, ConfigCommand, IdStyleArg, Locale, StoreArgs};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    form: FormStatus,
    questions: Vec<QuestionReport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestionReport {
    key: String,
    status: QuestionStatus,
    answers: Vec<AnswerStatus>,
}

pub fn run(cli: Cli) -> eyre::Result<()> {
    let store = open_store(&cli.store)?;

    match cli.command {
        Command::List => {
            for entry in list_forms(&store)? {
                let marker = if entry.readable { "" } else { " (unreadable)" };
                println!("{}\t{}{marker}", entry.id, entry.name);
            }
        }
        Command::Show { id } => {
            let form = store.load_form(&id)?;
            println!("{}", serde_json::to_string_pretty(&form)?);
        }
        Command::Import { file, id } => {
            let contents = std::fs::read_to_string(&file)
                .map_err(|e| eyre::eyre!("failed to read {}: {e}", file.display()))?;
            let form: FormDocument = serde_json::from_str(&contents)?;
            let id = id.unwrap_or_else(|| {
                let name = if form.name.is_empty() {
                    &form.form_template.name
                } else {
                    &form.name
                };
                form_id_from_name(name, store.id_style())
            });
            store.save_form(&id, &form)?;
            println!("{id}");
        }
        Command::Templates => {
            let templates = load_templates(&store)?;
            println!("{}", serde_json::to_string_pretty(&templates)?);
        }
        Command::Create { template } => {
            let contents = std::fs::read_to_string(&template)
                .map_err(|e| eyre::eyre!("failed to read {}: {e}", template.display()))?;
            let template: FormTemplate = serde_json::from_str(&contents)?;
            let id = create_form(&store, template)?;
            println!("{id}");
        }
        Command::Answer { id, answers } => {
            let answers: Map<String, Value> = answers.into_iter().collect();
            let appended = append_answers(&store, &id, &answers, jiff::Timestamp::now())?;
            println!("recorded {appended} of {} answers", answers.len());
        }
        Command::Status { id } => {
            let form = store.load_form(&id)?;
            println!("{}", serde_json::to_string_pretty(&status_report(&form))?);
        }
        Command::Summary { id, locale } => {
            let form = store.load_form(&id)?;
            let labels = match locale {
                Locale::En => SummaryLabels::english(),
                Locale::Cs => SummaryLabels::czech(),
            };
            println!("{}", render_summary_with(&form, &labels));
        }
        Command::Delete { id } => {
            store.delete_form(&id)?;
        }
        Command::Config { command } => match command {
            ConfigCommand::Show => {
                println!("{}", serde_json::to_string_pretty(&store.load_config())?);
            }
            ConfigCommand::SetUser { name } => {
                let mut config = store.load_config();
                config.user = name;
                store.save_config(&config)?;
            }
        },
    }

    Ok(())
}

fn open_store(args: &StoreArgs) -> eyre::Result<LocalStore> {
    let mut config = match &args.root {
        Some(root) => StoreConfig::new(root),
        None => StoreConfig::default_location()?,
    };
    if let Some(forms_dir) = &args.forms_dir {
        config = config.with_forms_dir(forms_dir);
    }
    if let Some(style) = args.id_style {
        config = config.with_id_style(match style {
            IdStyleArg::Underscore => IdStyle::Underscore,
            IdStyleArg::Hyphen => IdStyle::Hyphen,
        });
    }

    tracing::debug!(root = %config.root.display(), "opening store");
    Ok(LocalStore::open(config)?)
}

fn status_report(form: &FormDocument) -> StatusReport {
    let questions = form
        .form_template
        .questions
        .iter()
        .enumerate()
        .map(|(idx, question)| QuestionReport {
            key: question.key.clone(),
            status: question_status(form, idx),
            answers: answer_statuses(form, idx),
        })
        .collect();

    StatusReport {
        form: form_status(form),
        questions,
    }
}

/// Parse `KEY=VALUE`; VALUE is read as JSON and falls back to a plain string.
pub fn parse_answer(arg: &str) -> Result<(String, Value), String> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    if key.is_empty() {
        return Err(format!("missing key in '{arg}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

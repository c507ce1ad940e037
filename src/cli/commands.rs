//! Command implementations for the asdscreen CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, ScreenError};
use crate::predict::{HistoryEntry, Predictor, SessionHistory};
use crate::schema::FeatureSchema;
use crate::survey::answer::{AnswerValue, SurveyResponse};
use crate::survey::questionnaire::{FieldKind, FieldSpec, questionnaire};

/// Execute a CLI command.
pub fn execute_command(args: ScreenArgs) -> Result<()> {
    match &args.command {
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Session(session_args) => run_session(session_args.clone(), &args),
        Command::Schema(schema_args) => show_schema(schema_args.clone(), &args),
        Command::Validate(validate_args) => validate_artifacts(validate_args.clone(), &args),
    }
}

/// Run one prediction from a JSON answers file.
fn predict(args: PredictArgs, cli_args: &ScreenArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading artifacts from: {}", args.artifacts.display());
    }
    let predictor = Predictor::load(&args.artifacts)?;

    let file = File::open(&args.answers_file)?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
    let response = SurveyResponse::from_json(&value)?;

    let prediction = predictor.predict(&response)?;

    match cli_args.output_format {
        OutputFormat::Human => {
            print_prediction_human(&prediction);
            Ok(())
        }
        OutputFormat::Json => output_result(
            "",
            &PredictionReport::from_prediction(&prediction),
            cli_args,
        ),
    }
}

/// Run the interactive screening session.
fn run_session(args: SessionArgs, cli_args: &ScreenArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading artifacts from: {}", args.artifacts.display());
    }
    let predictor = Predictor::load(&args.artifacts)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut history = SessionHistory::new();

    println!("Early Autism Screening Tool");
    println!();
    println!("{DISCLAIMER}");

    loop {
        println!();
        let response = match collect_response(&mut input)? {
            Some(response) => response,
            None => break, // EOF mid-form
        };

        match predictor.predict(&response) {
            Ok(prediction) => {
                println!();
                print_prediction_human(&prediction);
                history.append(HistoryEntry::record(&response, &prediction));
            }
            // Per-request failure: report it and keep the session alive.
            Err(e) => eprintln!("Error: {e}"),
        }

        println!();
        match prompt_line(&mut input, "Screen another child? [y/N] ")? {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    println!();
    print_history_human(history.entries());
    Ok(())
}

/// Show the questionnaire and the trained column order.
fn show_schema(args: SchemaArgs, cli_args: &ScreenArgs) -> Result<()> {
    let schema = FeatureSchema::load(&args.artifacts.join(crate::predict::SCHEMA_FILE))?;

    let questions = questionnaire()
        .iter()
        .map(|spec| QuestionReport {
            name: spec.name.to_string(),
            prompt: spec.prompt.to_string(),
            kind: match &spec.kind {
                FieldKind::Categorical { .. } => "categorical".to_string(),
                FieldKind::Binary => "binary".to_string(),
                FieldKind::Numeric { .. } => "numeric".to_string(),
            },
            choices: field_choices(spec).iter().map(|c| c.to_string()).collect(),
            asked_when: spec
                .asked_when
                .as_ref()
                .map(|gate| format!("{} = {}", gate.field, gate.answer)),
        })
        .collect();

    let report = SchemaReport {
        questions,
        trained_columns: schema.columns().to_vec(),
    };

    output_result("Screening questionnaire", &report, cli_args)
}

/// Load all artifacts and check they agree with each other.
fn validate_artifacts(args: ValidateArgs, cli_args: &ScreenArgs) -> Result<()> {
    let predictor = Predictor::load(&args.artifacts)?;

    let metadata = predictor.model().metadata();
    let consistent = predictor.schema().len() == predictor.scaler().len();

    if !consistent && cli_args.verbosity() > 0 {
        eprintln!(
            "Warning: schema has {} columns but the scaler was fitted on {}",
            predictor.schema().len(),
            predictor.scaler().len()
        );
    }

    let report = ValidationReport {
        model_name: metadata.name.clone(),
        model_version: metadata.version.clone(),
        model_trees: predictor.model().num_trees(),
        schema_columns: predictor.schema().len(),
        scaler_columns: predictor.scaler().len(),
        consistent,
    };

    output_result("Artifacts loaded", &report, cli_args)
}

/// Collect a full response by prompting each questionnaire field in order.
///
/// Gated fields are skipped when their prerequisite does not hold; the
/// encoder forces their default before encoding. Returns `None` on EOF.
fn collect_response(input: &mut impl BufRead) -> Result<Option<SurveyResponse>> {
    let mut response = SurveyResponse::new();

    for spec in questionnaire() {
        if !spec.is_asked(&response) {
            continue;
        }
        match collect_answer(input, spec)? {
            Some(answer) => response.set(spec.name, answer),
            None => return Ok(None),
        }
    }

    Ok(Some(response))
}

/// Prompt for one field until a valid answer arrives. Returns `None` on EOF.
fn collect_answer(input: &mut impl BufRead, spec: &FieldSpec) -> Result<Option<AnswerValue>> {
    loop {
        let line = match prompt_line(input, &render_prompt(spec))? {
            Some(line) => line,
            None => return Ok(None),
        };

        match parse_answer(spec, line.trim()) {
            Ok(answer) => return Ok(Some(answer)),
            Err(e) => println!("{e}"),
        }
    }
}

/// Parse and validate one raw input line against a field's constraints.
///
/// An empty line selects the widget default: the declared default for
/// numeric fields, the first choice otherwise.
fn parse_answer(spec: &FieldSpec, raw: &str) -> Result<AnswerValue> {
    let answer = match &spec.kind {
        FieldKind::Numeric { default, .. } => {
            let value = if raw.is_empty() {
                *default
            } else {
                raw.parse::<i64>().map_err(|_| {
                    ScreenError::answer(format!("'{raw}' is not a whole number"))
                })?
            };
            AnswerValue::Integer(value)
        }
        FieldKind::Categorical { choices } => {
            let label = if raw.is_empty() {
                choices[0]
            } else if let Ok(index) = raw.parse::<usize>() {
                choices.get(index.wrapping_sub(1)).copied().ok_or_else(|| {
                    ScreenError::answer(format!(
                        "enter a number between 1 and {}",
                        choices.len()
                    ))
                })?
            } else {
                raw
            };
            AnswerValue::from(label)
        }
        FieldKind::Binary => {
            let label = match raw {
                "" | "n" | "N" | "no" | "No" => "No",
                "y" | "Y" | "yes" | "Yes" => "Yes",
                other => other,
            };
            AnswerValue::from(label)
        }
    };

    spec.validate(&answer)?;
    Ok(answer)
}

/// Render the prompt for one field, widget-style.
fn render_prompt(spec: &FieldSpec) -> String {
    match &spec.kind {
        FieldKind::Numeric { min, max, default } => {
            format!("{} ({min}-{max}) [{default}]: ", spec.prompt)
        }
        FieldKind::Categorical { choices } => {
            let numbered = choices
                .iter()
                .enumerate()
                .map(|(i, choice)| format!("{}={choice}", i + 1))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} ({numbered}) [{}]: ", spec.prompt, choices[0])
        }
        FieldKind::Binary => format!("{} [y/N]: ", spec.prompt),
    }
}

fn field_choices(spec: &FieldSpec) -> &'static [&'static str] {
    match &spec.kind {
        FieldKind::Categorical { choices } => *choices,
        FieldKind::Binary => &["Yes", "No"],
        FieldKind::Numeric { .. } => &[],
    }
}

/// Print a prompt and read one line. Returns `None` on EOF.
fn prompt_line(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

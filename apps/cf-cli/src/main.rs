use std::path::{Path, PathBuf};

use cf_app::{
    Action, AppConfig, AppError, AppResult, ConverterAction, ConverterState, ConverterStatus,
    Direction, FormController, FormView, describe_formula, list_formulas, list_units, load_config,
    standard_registry, to_json, view,
};
use cf_formula::BitWidth;
use cf_units::{Dimension, lookup, split_value_and_unit};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "calcflow CLI - unit-aware engineering formula calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available formulas
    List,
    /// Show quantities, units and rearrangements of a formula
    Show {
        /// Formula ID (see `list`)
        id: String,
    },
    /// List the units of a dimension
    Units {
        /// Dimension name, e.g. length, flow-rate, temperature
        dimension: String,
    },
    /// Solve a formula for its missing quantity
    Solve {
        /// Formula ID (see `list`)
        id: String,
        /// Input value as key=value[unit], e.g. m=5kg or d=200mm
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Unit for a field as key=unit; on the solved quantity this picks the output unit
        #[arg(long = "unit", value_name = "KEY=UNIT")]
        unit: Vec<String>,
        /// Quantity to solve for when several could be
        #[arg(long)]
        target: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Path to a YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Two's-complement conversion
    #[command(subcommand)]
    Twos(TwosCommands),
}

#[derive(Subcommand)]
enum TwosCommands {
    /// Signed decimal to two's-complement binary
    Encode {
        #[arg(allow_hyphen_values = true)]
        decimal: String,
        /// Bit width: 4, 8, 16 or 32
        #[arg(long, default_value_t = 8)]
        bits: u32,
        #[arg(long)]
        json: bool,
    },
    /// Two's-complement binary to signed decimal
    Decode {
        binary: String,
        /// Bit width: 4, 8, 16 or 32
        #[arg(long, default_value_t = 8)]
        bits: u32,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Show { id } => cmd_show(&id),
        Commands::Units { dimension } => cmd_units(&dimension),
        Commands::Solve {
            id,
            set,
            unit,
            target,
            json,
            config,
        } => cmd_solve(&id, &set, &unit, target, json, config.as_deref()),
        Commands::Twos(twos) => match twos {
            TwosCommands::Encode {
                decimal,
                bits,
                json,
            } => cmd_twos(Direction::DecimalToBinary, decimal, bits, json),
            TwosCommands::Decode { binary, bits, json } => {
                cmd_twos(Direction::BinaryToDecimal, binary, bits, json)
            }
        },
    }
}

fn cmd_list() -> AppResult<()> {
    let formulas = list_formulas(standard_registry()?);
    println!("Formulas:");
    for f in formulas {
        let modes = if f.has_modes { " [modes]" } else { "" };
        println!("  {:<32} {}{}", f.id, f.name, modes);
    }
    Ok(())
}

fn cmd_show(id: &str) -> AppResult<()> {
    let detail = describe_formula(standard_registry()?, id)?;
    println!("{} ({})", detail.name, detail.id);
    println!("  {}", detail.equation);
    println!();
    println!("Quantities:");
    for q in &detail.quantities {
        let default = q
            .default_value
            .as_deref()
            .map(|v| format!(", default {v}"))
            .unwrap_or_default();
        let role = if q.solvable { "" } else { ", input only" };
        println!(
            "  {:<6} {} {} [{}], {}{}{}",
            q.key, q.symbol, q.name, q.default_unit, q.constraint, default, role
        );
        println!("         units: {}", q.units.join(", "));
    }
    println!();
    println!("Rearrangements:");
    for r in &detail.rearrangements {
        let optional = if r.optional.is_empty() {
            String::new()
        } else {
            format!(" (optional: {})", r.optional.join(", "))
        };
        println!(
            "  {:<6} from {}{}: {}",
            r.target,
            r.requires.join(", "),
            optional,
            r.equation
        );
    }
    Ok(())
}

fn cmd_units(dimension: &str) -> AppResult<()> {
    for u in list_units(dimension)? {
        let base = if u.base { " (base)" } else { "" };
        println!("  {:<14} {}{}", u.symbol, u.name, base);
    }
    Ok(())
}

/// Split `key=value[unit]` into the key, the number text and the unit text.
///
/// A suffix that names no known unit stays part of the value, so the solver
/// reports the bad number instead of an unknown unit.
fn parse_assignment(text: &str) -> AppResult<(String, String, String)> {
    let (key, rest) = text
        .split_once('=')
        .ok_or_else(|| AppError::InvalidInput(format!("expected key=value, got '{text}'")))?;
    let (value, unit) = split_value_and_unit(rest);
    let known_unit = unit.is_empty() || Dimension::ALL.iter().any(|&d| lookup(d, unit).is_ok());
    if value.is_empty() || !known_unit {
        return Ok((key.trim().to_string(), rest.trim().to_string(), String::new()));
    }
    Ok((key.trim().to_string(), value.to_string(), unit.to_string()))
}

fn parse_unit(text: &str) -> AppResult<(String, String)> {
    let (key, unit) = text
        .split_once('=')
        .ok_or_else(|| AppError::InvalidInput(format!("expected key=unit, got '{text}'")))?;
    Ok((key.trim().to_string(), unit.trim().to_string()))
}

/// Translate command-line arguments into form actions, ending with `Calculate`.
fn solve_actions(
    set: &[String],
    unit: &[String],
    target: Option<String>,
) -> AppResult<Vec<Action>> {
    let mut actions = Vec::new();
    for text in set {
        let (key, raw, unit) = parse_assignment(text)?;
        actions.push(Action::SetValue {
            key: key.clone(),
            raw,
        });
        if !unit.is_empty() {
            actions.push(Action::SetUnit { key, unit });
        }
    }
    for text in unit {
        let (key, unit) = parse_unit(text)?;
        actions.push(Action::SetUnit { key, unit });
    }
    if target.is_some() {
        actions.push(Action::SelectTarget(target));
    }
    actions.push(Action::Calculate);
    Ok(actions)
}

fn cmd_solve(
    id: &str,
    set: &[String],
    unit: &[String],
    target: Option<String>,
    json: bool,
    config_path: Option<&Path>,
) -> AppResult<()> {
    let registry = standard_registry()?;
    let config = match config_path {
        Some(path) => load_config(path, registry)?,
        None => AppConfig::default(),
    };
    let spec = registry
        .get(id)
        .map_err(|_| AppError::NotFound(format!("formula '{id}'")))?;

    let mut controller = FormController::new(spec, config.format);
    if let Some(overrides) = config.units_for(id) {
        controller = controller.with_unit_overrides(overrides);
    }

    info!(formula = id, inputs = set.len(), "solving");
    let mut state = controller.initial_state();
    for action in solve_actions(set, unit, target)? {
        state = controller.reduce(state, action);
        // An unknown key stops here instead of being hidden by the next edit.
        if matches!(view(&state), FormView::Error { .. }) {
            break;
        }
    }

    let rendered = view(&state);
    if json {
        println!("{}", to_json(&rendered)?);
    } else {
        print_view(&rendered);
    }
    if matches!(rendered, FormView::Error { .. }) {
        std::process::exit(1);
    }
    Ok(())
}

fn print_view(view: &FormView) {
    match view {
        FormView::Idle => println!("Nothing calculated"),
        FormView::Result { block, steps } => {
            println!("{}: {} {}", block.label, block.formatted_value, block.unit);
            println!();
            for step in steps {
                println!("{step}");
            }
        }
        FormView::Error { kind, message } => {
            eprintln!("Error ({kind:?}): {message}");
        }
    }
}

fn cmd_twos(direction: Direction, input: String, bits: u32, json: bool) -> AppResult<()> {
    let width = BitWidth::try_from(bits)?;
    let state = [
        ConverterAction::SetDirection(direction),
        ConverterAction::SetWidth(width),
        ConverterAction::SetInput(input),
        ConverterAction::Convert,
    ]
    .into_iter()
    .fold(ConverterState::default(), ConverterState::reduce);

    match state.status {
        ConverterStatus::Success(out) if json => println!("{}", to_json(&out)?),
        ConverterStatus::Success(out) => {
            println!("{} = {} ({}-bit)", out.decimal, out.binary, width.bits());
            println!();
            for step in &out.steps {
                println!("{step}");
            }
        }
        ConverterStatus::Error { kind, message } => {
            eprintln!("Error ({kind:?}): {message}");
            std::process::exit(1);
        }
        ConverterStatus::Idle => println!("Nothing converted"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assignment_splits_value_and_unit() {
        assert_eq!(
            parse_assignment("d=200mm").unwrap(),
            ("d".to_string(), "200".to_string(), "mm".to_string())
        );
        assert_eq!(
            parse_assignment("m = 5 kg").unwrap(),
            ("m".to_string(), "5".to_string(), "kg".to_string())
        );
        assert!(parse_assignment("m5kg").is_err());
    }

    #[test]
    fn non_numeric_value_is_kept_whole() {
        assert_eq!(
            parse_assignment("m=five").unwrap(),
            ("m".to_string(), "five".to_string(), String::new())
        );
        assert_eq!(
            parse_assignment("m=12abc").unwrap(),
            ("m".to_string(), "12abc".to_string(), String::new())
        );
    }

    #[test]
    fn non_numeric_value_reports_invalid_number() {
        let registry = standard_registry().unwrap();
        let spec = registry.get("potential-energy").unwrap();
        let controller = FormController::new(spec, AppConfig::default().format);

        for bad in ["m=five", "m=12abc"] {
            let set = [bad.to_string(), "h=10".to_string(), "pe=100".to_string()];
            let state = solve_actions(&set, &[], None)
                .unwrap()
                .into_iter()
                .fold(controller.initial_state(), |state, action| controller.reduce(state, action));
            match view(&state) {
                FormView::Error { message, .. } => {
                    assert_eq!(message, "Mass must be a valid number", "input {bad}");
                }
                other => panic!("expected an error for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn actions_end_with_calculate() {
        let actions = solve_actions(
            &["s=5".to_string()],
            &["sa=cm²".to_string()],
            Some("sa".to_string()),
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![
                Action::SetValue {
                    key: "s".into(),
                    raw: "5".into()
                },
                Action::SetUnit {
                    key: "sa".into(),
                    unit: "cm²".into()
                },
                Action::SelectTarget(Some("sa".into())),
                Action::Calculate,
            ]
        );
    }

    #[test]
    fn negative_decimal_is_accepted() {
        let cli = Cli::try_parse_from(["cf-cli", "twos", "encode", "-42", "--bits", "8"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Twos(TwosCommands::Encode { ref decimal, bits: 8, .. }) if decimal == "-42"
        ));
    }
}

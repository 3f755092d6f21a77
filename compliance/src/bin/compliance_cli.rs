//! CLI for evaluating the outdated instance type rule locally.
//!
//! Subcommands:
//! - `evaluate`: Load a change event JSON file, evaluate it, print the evaluation.
//! - `check`: Build a change event from flags and print the verdict.
//!
//! Nothing is submitted to AWS Config.
//!
//! Exit codes: 0 = compliant or not applicable, 1 = non-compliant, 2 = error.

use std::process;

use clap::{Parser, Subcommand};
use serde_json::json;

use outdated_instance_common::{ChangeEvent, ComplianceVerdict, INSTANCE_RESOURCE_TYPE};
use outdated_instance_compliance::policy::{Evaluation, RuleEngine};

#[derive(Parser)]
#[command(
    name = "outdated-instance-cli",
    about = "Evaluate the outdated EC2 instance type Config rule offline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a change event as delivered by AWS Config.
    Evaluate {
        /// Path to the change event JSON file.
        event: String,
    },
    /// Evaluate a single instance type against an outdated list.
    Check {
        /// Instance type recorded for the resource.
        #[arg(long)]
        instance_type: String,
        /// Comma-separated outdated instance types (e.g. m1.small,m1.medium).
        #[arg(long)]
        outdated_list: String,
        /// Resource type of the configuration item.
        #[arg(long, default_value = INSTANCE_RESOURCE_TYPE)]
        resource_type: String,
        /// Configuration item status.
        #[arg(long, default_value = "OK")]
        status: String,
        /// Mark the resource as having left the rule scope.
        #[arg(long)]
        left_scope: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Evaluate { event } => run_evaluate(&event),
        Commands::Check {
            instance_type,
            outdated_list,
            resource_type,
            status,
            left_scope,
        } => run_check(
            &instance_type,
            &outdated_list,
            &resource_type,
            &status,
            left_scope,
        ),
    };

    process::exit(exit_code);
}

fn run_evaluate(event_path: &str) -> i32 {
    let event_json = match std::fs::read_to_string(event_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot read event file '{}': {}", event_path, e);
            return 2;
        }
    };
    let event: ChangeEvent = match serde_json::from_str(&event_json) {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("Error: cannot parse change event JSON: {}", e);
            return 2;
        }
    };

    let evaluation = match RuleEngine.evaluate(&event) {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("Error: evaluation failed: {}", e);
            return 2;
        }
    };

    match serde_json::to_string_pretty(&evaluation) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot serialize evaluation: {}", e);
            return 2;
        }
    }

    exit_code_for(&evaluation)
}

fn run_check(
    instance_type: &str,
    outdated_list: &str,
    resource_type: &str,
    status: &str,
    left_scope: bool,
) -> i32 {
    let invoking_event = json!({
        "configurationItem": {
            "resourceType": resource_type,
            "resourceId": "cli-resource",
            "configurationItemStatus": status,
            "configurationItemCaptureTime": "1970-01-01T00:00:00.000Z",
            "configuration": { "instanceType": instance_type }
        }
    });
    let event = ChangeEvent {
        invoking_event: invoking_event.to_string(),
        rule_parameters: json!({ "outdatedInstanceList": outdated_list }).to_string(),
        result_token: "cli".to_string(),
        event_left_scope: left_scope,
        config_rule_name: None,
        config_rule_arn: None,
        account_id: None,
        version: None,
    };

    match RuleEngine.evaluate(&event) {
        Ok(evaluation) => {
            println!("{}: {}", evaluation.verdict(), evaluation.reason);
            exit_code_for(&evaluation)
        }
        Err(e) => {
            eprintln!("Error: evaluation failed: {}", e);
            2
        }
    }
}

fn exit_code_for(evaluation: &Evaluation) -> i32 {
    if evaluation.verdict() == ComplianceVerdict::NonCompliant {
        1
    } else {
        0
    }
}

//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;
use planning::{DeployPlan, DestroyPlan};

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the grouper tables.
    Deploy(DeployCommand),
}

/// Deploy or destroy the event, group and user tables.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the grouper DynamoDB tables.

By default, this command creates the events, groups and users tables,
each keyed by its entity id (eventId, groupId, userId).

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  EVENTS_TABLE_NAME   - Events table (defaults to grouper-events)
  GROUPS_TABLE_NAME   - Groups table (defaults to grouper-groups)
  USERS_TABLE_NAME    - Users table (defaults to grouper-users)
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the tables instead of creating them.
    #[arg(long)]
    pub destroy: bool,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();
    let tables = config::grouper_table_configs(&grouper::config::Config::from_env());

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;

    let mut current_states = Vec::with_capacity(tables.len());
    for table in &tables {
        current_states.push(client::get_table_state(&dynamo_client, &table.table_name).await?);
    }

    if cmd.destroy {
        run_destroy(&dynamo_client, &cmd, global, &tables, &current_states).await
    } else {
        let plans: Vec<DeployPlan> = tables
            .iter()
            .zip(&current_states)
            .map(|(table, state)| planning::calculate_deploy_plan(state.as_ref(), table))
            .collect();

        if !global.is_silent() {
            aprintln!("{}", p_c("Deploy Plan:"));
            for line in plans.iter().flat_map(planning::format_deploy_plan) {
                if line.starts_with('+') {
                    aprintln!("  {}", p_g(&line));
                } else if line.starts_with('!') {
                    aprintln!("  {}", p_r(&line));
                } else {
                    aprintln!("  {}", line);
                }
            }
            aprintln!();
        }

        if let Some(DeployPlan::KeyConflict { table_name, .. }) = plans
            .iter()
            .find(|plan| matches!(plan, DeployPlan::KeyConflict { .. }))
        {
            return Err(DynamodbError::KeyConflict {
                table_name: table_name.clone(),
            });
        }

        if !plans.iter().any(DeployPlan::is_change) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure is up to date."));
            }
            return Ok(());
        }

        if !cmd.force {
            let confirmed = Confirm::new()
                .with_prompt("Apply these changes?")
                .default(true)
                .interact()?;

            if !confirmed {
                return Err(DynamodbError::UserCancelled);
            }
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Applying changes..."));
        }

        for plan in &plans {
            deploy::execute_deploy_plan(&dynamo_client, plan).await?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure deployed successfully."));
        }

        Ok(())
    }
}

async fn run_destroy(
    dynamo_client: &aws_sdk_dynamodb::Client,
    cmd: &DeployCommand,
    global: &crate::Global,
    tables: &[config::TableConfig],
    current_states: &[Option<planning::TableState>],
) -> Result<()> {
    let plans: Vec<DestroyPlan> = tables
        .iter()
        .zip(current_states)
        .map(|(table, state)| planning::calculate_destroy_plan(state.as_ref(), &table.table_name))
        .collect();

    if !global.is_silent() {
        aprintln!("{}", p_y("Destroy Plan:"));
        for line in plans.iter().flat_map(planning::format_destroy_plan) {
            aprintln!("  {}", p_r(&line));
        }
        aprintln!();
    }

    if plans
        .iter()
        .all(|plan| matches!(plan, DestroyPlan::AlreadyGone { .. }))
    {
        if !global.is_silent() {
            aprintln!("{}", p_g("Nothing to destroy."));
        }
        return Ok(());
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt("Are you sure you want to delete these tables? ALL DATA WILL BE LOST")
            .default(false)
            .interact()?;

        if !confirmed {
            return Err(DynamodbError::UserCancelled);
        }
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Deleting tables..."));
    }

    for plan in &plans {
        deploy::execute_destroy_plan(dynamo_client, plan).await?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Tables destroyed successfully."));
    }

    Ok(())
}

use std::{path::PathBuf, sync::Arc};

use chrono::Local;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use budgetwise_config::{model::default_data_dir, Config, ConfigManager};
use budgetwise_core::{BudgetGoalForm, TransactionForm, TransactionQueryParams};
use budgetwise_domain::{Category, Transaction};
use budgetwise_storage_json::JsonFileStore;

use super::{
    output::{self, Renderer},
    BudgetCommand, Cli, CliError, Command, ConfigCommand, EditArgs, ListArgs, TransactionArgs,
};
use crate::{
    actions::{ActionResponse, ActionResult},
    insights::InsightService,
    server,
    utils::build_info,
    ActionError, BudgetActions,
};

struct CliContext {
    config: Config,
    config_path: PathBuf,
    data_dir: PathBuf,
    actions: BudgetActions,
    renderer: Renderer,
    json: bool,
    ephemeral: bool,
}

/// Executes one parsed command line.
pub fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Version = cli.command {
        print_version();
        return Ok(());
    }

    let ctx = build_context(cli.ephemeral, cli.json)?;
    match cli.command {
        Command::Serve { host, port } => cmd_serve(&ctx, host, port),
        Command::Add(args) => cmd_add(&ctx, args),
        Command::Edit { id, fields } => cmd_edit(&ctx, &id, fields),
        Command::Delete { id } => emit(&ctx, ctx.actions.delete_transaction(&id), |ctx, txn| {
            ctx.renderer.transaction("Deleted", txn)
        }),
        Command::List(args) => cmd_list(&ctx, args),
        Command::Budget(command) => cmd_budget(&ctx, command),
        Command::Dashboard => emit(&ctx, ctx.actions.dashboard(), |ctx, dashboard| {
            ctx.renderer.dashboard(dashboard)
        }),
        Command::Report => emit(&ctx, ctx.actions.report(), |ctx, report| {
            ctx.renderer.report(report)
        }),
        Command::Insights { timeline } => cmd_insights(&ctx, &timeline),
        Command::Categories => emit(&ctx, Ok(ctx.actions.categories()), |_, catalog| {
            output::section("Expense categories");
            catalog.expense.iter().for_each(|category| println!("  {category}"));
            output::section("Income categories");
            catalog.income.iter().for_each(|category| println!("  {category}"));
        }),
        Command::Seed => emit(&ctx, ctx.actions.seed_sample_data(), |_, count| {
            output::success(format!("Loaded {count} sample transactions and budget goals."))
        }),
        Command::Config(command) => cmd_config(&ctx, command),
        Command::Version => Ok(()),
    }
}

fn build_context(ephemeral: bool, json: bool) -> Result<CliContext, CliError> {
    let config_path = default_data_dir().join("config").join("config.json");
    let config = ConfigManager::new(config_path.clone()).load_effective()?;
    let data_dir = config.resolve_data_dir();

    let actions = if ephemeral {
        BudgetActions::in_memory()
    } else {
        BudgetActions::with_store(Arc::new(JsonFileStore::open_in(&data_dir)?))
    };
    let mut actions = actions.with_recent_limit(config.recent_transactions_limit);
    if let Some(service) = InsightService::from_settings(&config.insights) {
        actions = actions.with_insights(service);
    }

    Ok(CliContext {
        renderer: Renderer::new(&config.locale, &config.currency),
        config,
        config_path,
        data_dir,
        actions,
        json,
        ephemeral,
    })
}

/// Prints the result as an envelope under `--json`, otherwise through `render`.
fn emit<T, F>(ctx: &CliContext, result: ActionResult<T>, render: F) -> Result<(), CliError>
where
    T: Serialize,
    F: FnOnce(&CliContext, &T),
{
    if ctx.json {
        let response = ActionResponse::from(result);
        print_json(&response);
        return if response.success {
            Ok(())
        } else {
            Err(CliError::Reported)
        };
    }
    let value = result?;
    render(ctx, &value);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => output::error(format!("failed to encode JSON output: {err}")),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

fn cmd_serve(ctx: &CliContext, host: Option<String>, port: Option<u16>) -> Result<(), CliError> {
    let mut settings = ctx.config.server.clone();
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }
    let address = settings.address();
    if ctx.ephemeral {
        output::warning("Serving an in-memory store; data is lost on exit.");
    }
    output::info(format!("BudgetWise API listening on http://{address}"));
    runtime()?.block_on(server::run(&address, ctx.actions.clone()))?;
    Ok(())
}

fn cmd_add(ctx: &CliContext, args: TransactionArgs) -> Result<(), CliError> {
    let form = TransactionForm {
        description: args.description,
        amount: args.amount,
        transaction_type: args.kind,
        category: args.category,
        date: args
            .date
            .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string()),
    };
    emit(ctx, ctx.actions.add_transaction(&form), |ctx, txn| {
        ctx.renderer.transaction("Added", txn)
    })
}

fn cmd_edit(ctx: &CliContext, id: &str, fields: EditArgs) -> Result<(), CliError> {
    let existing = find_transaction(ctx, id);
    let result = existing.and_then(|current| {
        let form = TransactionForm {
            description: fields.description.unwrap_or(current.description),
            amount: fields.amount.unwrap_or_else(|| current.amount.to_string()),
            transaction_type: fields
                .kind
                .unwrap_or_else(|| current.transaction_type.to_string()),
            category: fields
                .category
                .unwrap_or_else(|| current.category.to_string()),
            date: fields.date.unwrap_or_else(|| current.date.to_string()),
        };
        ctx.actions.edit_transaction(id, &form)
    });
    emit(ctx, result, |ctx, txn| ctx.renderer.transaction("Updated", txn))
}

fn find_transaction(ctx: &CliContext, id: &str) -> ActionResult<Transaction> {
    ctx.actions
        .list_transactions()?
        .into_iter()
        .find(|txn| txn.id.to_string() == id.trim().to_ascii_lowercase())
        .ok_or_else(|| ActionError::not_found("Transaction not found."))
}

fn cmd_list(ctx: &CliContext, args: ListArgs) -> Result<(), CliError> {
    let params = TransactionQueryParams {
        search: args.search,
        category: args.category,
        transaction_type: args.kind,
        start_date: args.from,
        end_date: args.to,
        sort_key: args.sort,
        sort_direction: args.direction,
    };
    emit(ctx, ctx.actions.query_transactions(params), |ctx, transactions| {
        ctx.renderer.transactions(transactions)
    })
}

fn cmd_budget(ctx: &CliContext, command: BudgetCommand) -> Result<(), CliError> {
    match command {
        BudgetCommand::Set { category, amount } => {
            let form = BudgetGoalForm { category, amount };
            emit(ctx, ctx.actions.set_budget_goal(&form), |ctx, goal| {
                output::success(format!(
                    "Budget for {} set to {} per month.",
                    goal.category,
                    ctx.renderer.money(goal.amount)
                ))
            })
        }
        BudgetCommand::List => emit(ctx, ctx.actions.list_budget_goals(), |ctx, goals| {
            ctx.renderer.goals(goals)
        }),
        BudgetCommand::Status => emit(ctx, ctx.actions.budget_progress(), |ctx, rows| {
            ctx.renderer.progress(rows)
        }),
    }
}

fn cmd_insights(ctx: &CliContext, timeline: &str) -> Result<(), CliError> {
    let result = runtime()?.block_on(async {
        let token = CancellationToken::new();
        let on_interrupt = token.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });
        let result = ctx.actions.insights_for_timeline(timeline, &token).await;
        watcher.abort();
        result
    });
    emit(ctx, result, |_, advice| {
        output::section("AI Budget Assistant");
        println!("{}", advice.insights);
    })
}

#[derive(Serialize)]
struct ConfigView<'a> {
    config_path: &'a PathBuf,
    data_dir: &'a PathBuf,
    ephemeral: bool,
    insights_configured: bool,
    config: &'a Config,
}

fn cmd_config(ctx: &CliContext, command: ConfigCommand) -> Result<(), CliError> {
    match command {
        ConfigCommand::Show => {
            let view = ConfigView {
                config_path: &ctx.config_path,
                data_dir: &ctx.data_dir,
                ephemeral: ctx.ephemeral,
                insights_configured: ctx.config.insights.api_key().is_some(),
                config: &ctx.config,
            };
            emit(ctx, Ok(view), |ctx, view| {
                output::section("Configuration");
                println!("Config file  : {}", view.config_path.display());
                println!("Data dir     : {}", view.data_dir.display());
                println!("Locale       : {}", ctx.config.locale);
                println!("Currency     : {}", ctx.config.currency);
                println!("Recent limit : {}", ctx.config.recent_transactions_limit);
                println!("Server       : {}", ctx.config.server.address());
                println!(
                    "Insights     : {} ({})",
                    ctx.config.insights.model, ctx.config.insights.endpoint
                );
                println!(
                    "API key      : {} via ${}",
                    if view.insights_configured { "set" } else { "not set" },
                    ctx.config.insights.api_key_env
                );
            })
        }
        ConfigCommand::Init => {
            let manager = ConfigManager::new(ctx.config_path.clone());
            let created = if manager.config_path().exists() {
                false
            } else {
                manager.save(&Config::default())?;
                true
            };
            emit(ctx, Ok(created), |ctx, created| {
                if *created {
                    output::success(format!("Wrote {}", ctx.config_path.display()));
                } else {
                    output::info(format!("{} already exists", ctx.config_path.display()));
                }
            })
        }
    }
}

fn print_version() {
    let meta = build_info::current();
    output::section(format!("BudgetWise {}", meta.version));
    output::info(format!("  Schema ver   : v{}", budgetwise_domain::CURRENT_SCHEMA_VERSION));
    output::info(format!("  Build hash   : {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
    output::info(format!("  Categories   : {}", Category::ALL.len()));
}

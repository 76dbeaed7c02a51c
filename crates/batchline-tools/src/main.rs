//! Local driver for the batchline operation surface.

use batchline_tools::{logging, BatchTools, ToolReply, ToolsConfig};
use clap::{value_parser, Arg, ArgAction, Command};

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Command::new("batchline")
        .version(batchline_tools::VERSION)
        .about("Staged batch-data lifecycle simulator")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("demo")
                .about("Run the create/process/validate/report chain")
                .arg(
                    Arg::new("count")
                        .long("count")
                        .default_value("5")
                        .value_parser(value_parser!(usize))
                        .help("Number of records to create"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value("standard")
                        .help("Record category (premium gets the lower rate)"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Fixed random seed for reproducible data"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print replies as JSON"),
                ),
        )
        .subcommand(Command::new("report").about("Print a report over an empty store"));

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("demo", args)) => {
            let count = *args.get_one::<usize>("count").unwrap();
            let category = args.get_one::<String>("category").unwrap().clone();
            let json = args.get_flag("json");

            let mut config = ToolsConfig::default();
            if let Some(seed) = args.get_one::<u64>("seed") {
                config = config.with_seed(*seed);
            }
            let domain = config.domain.clone();
            let tools = BatchTools::new(config);

            emit(&tools.create_data(count, &category).await, json);

            let batch = tools.run_batch(&domain).await;
            emit(&batch, json);
            if batch.chain_stop {
                std::process::exit(1);
            }

            let validation = tools.validate(&domain).await;
            emit(&validation, json);
            if validation.chain_stop {
                std::process::exit(1);
            }

            emit(&tools.generate_report().await, json);
        }
        Some(("report", _)) => {
            let tools = BatchTools::new(ToolsConfig::default());
            println!("{}", tools.generate_report().await.text);
        }
        _ => {}
    }
}

fn emit(reply: &ToolReply, json: bool) {
    if json {
        match serde_json::to_string_pretty(reply) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => eprintln!("failed to render reply: {err}"),
        }
    } else {
        println!("{}\n", reply.text);
    }
}

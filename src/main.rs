use clap::{Parser, Subcommand};
use dotenv::dotenv;
use redux_nodes::flow::{Builder, RuntimeConfig};
use redux_nodes::node::{LogSink, Message, RuntimeError};
use redux_nodes::state::StateStore;

use std::fs;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inject messages into a flow and print what comes out
    Run {
        /// Path to the flow file
        #[arg(short, long)]
        flow: String,

        /// Node that receives the messages
        #[arg(short, long)]
        node: String,

        /// A single message as JSON
        #[arg(short, long, conflicts_with = "input_file")]
        input: Option<String>,

        /// File with one JSON message per line
        #[arg(long)]
        input_file: Option<String>,

        /// Print the application state after the last message
        #[arg(long)]
        print_state: bool,
    },
    /// Serve a flow over HTTP
    Serve {
        /// Path to the flow file
        #[arg(short, long)]
        flow: String,

        /// Port to listen on (overrides REDUX_NODES_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn read_messages(
    input: Option<String>,
    input_file: Option<String>,
) -> Result<Vec<Message>, RuntimeError> {
    if let Some(path) = input_file {
        let content = fs::read_to_string(path)?;
        return content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(RuntimeError::from))
            .collect();
    }

    let input = input.unwrap_or_else(|| "{}".to_string());
    Ok(vec![serde_json::from_str(&input)?])
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = RuntimeConfig::from_env()?;

    let builder =
        Builder::new(StateStore::new(), Arc::new(LogSink)).with_max_hops(config.max_hops);

    match args.command {
        Commands::Run {
            flow,
            node,
            input,
            input_file,
            print_state,
        } => {
            let flow = builder.build_flow(&flow)?;
            let messages = read_messages(input, input_file)?;
            log::info!(
                "Injecting {} message(s) into {} of flow {}",
                messages.len(),
                node,
                flow.name()
            );

            for msg in messages {
                let dispatch = flow.inject(&node, msg).await?;
                println!("{}", serde_json::to_string(&dispatch)?);
            }

            if print_state {
                println!("{}", flow.state().snapshot().await);
            }
        }
        Commands::Serve { flow, port } => {
            let flow = builder.build_flow(&flow)?;
            let mut addr = config.addr();
            if let Some(port) = port {
                addr.set_port(port);
            }

            redux_nodes::flow::server::serve(Arc::new(flow), addr).await?;
        }
    }

    Ok(())
}

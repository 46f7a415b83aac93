use std::env;

use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vend_eng::Machine;
use vend_eng::csv::{read_ops, write_stats};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let path = env::args().nth(1).expect("usage: vend-eng <session.csv>");

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let mut machine = Machine::new();
    let (op_sender, op_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in read_ops(&path) {
            match result {
                Ok(op) => {
                    op_sender.send(op).await.unwrap();
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    machine.run(ReceiverStream::new(op_receiver)).await;

    let stats = machine.stats();
    info!(total_cash = %stats.total_cash, "session complete");
    write_stats(&stats);
}

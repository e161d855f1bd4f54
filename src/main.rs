use clap::Parser;
use log::error;
use profile_lookup_app::Args;
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let input = BufReader::new(tokio::io::stdin());
    if let Err(err) = profile_lookup_app::run(args, input, std::io::stdout()).await {
        error!("{}", err);
        std::process::exit(1);
    }
}

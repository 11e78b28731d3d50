use movielib::config::Config;

mod logging;

#[tokio::main]
async fn main() {
    logging::setup_logging();

    movielib::run(Config::from_env()).await;
}

mod app;
mod logging;

fn main() {
    let args = blockchainincubator::cli::parse();
    let code = app::run(args);
    std::process::exit(code)
}

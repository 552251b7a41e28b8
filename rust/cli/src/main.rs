use std::io;

fn main() {
    rinkside_cli::logging::init_logging();
    let code = rinkside_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}

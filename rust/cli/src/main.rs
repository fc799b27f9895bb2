use std::io;

fn main() {
    handscope_engine::logging::init_logging();
    let code = handscope_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}

use std::process::ExitCode;

use sheha_lib::output::StdIO;
use sheha_lib::runtime::Runtime;

fn main() -> ExitCode {
    // A missing .env file is normal; variables may come from the shell.
    dotenvy::dotenv().ok();
    sheha_cli::logging::init();

    let runtime = match Runtime::from_env() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let mut io = StdIO::new();
    sheha_cli::run(&args, &runtime, &mut io)
}

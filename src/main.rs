mod cli_runtime;

fn main() {
    if let Err(err) = cli_runtime::run() {
        if rad::prompt::is_exit_console(&err) {
            eprintln!("{}", err);
        } else {
            eprintln!("{:#}", err);
        }
        std::process::exit(1);
    }
}

fn main() -> std::process::ExitCode {
    mathealth_lib::run()
}

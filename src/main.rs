fn main() -> std::process::ExitCode {
    skinscan::run()
}

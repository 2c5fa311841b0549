fn main() {
    #[cfg(feature = "cli")]
    oxicmp::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("oxicmp: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(2);
    }
}

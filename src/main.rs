fn main() {
    #[cfg(feature = "cli")]
    fdrmatch::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("fdrmatch: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}

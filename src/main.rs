fn main() -> anyhow::Result<()> {
    restdoc::cli::run_cli()
}

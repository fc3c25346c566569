fn main() -> anyhow::Result<()> {
    distrstage::cli::run()
}

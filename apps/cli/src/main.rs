fn main() -> anyhow::Result<()> {
    termquiz::run()
}

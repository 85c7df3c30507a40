fn main() -> anyhow::Result<()> {
    logfmt_filter::run()
}

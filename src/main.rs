fn main() {
    portfolio::app::cli::run();
}

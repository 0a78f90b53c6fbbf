fn main() {
    if let Err(err) = hydratemind_lib::run() {
        eprintln!("hydratemind: {err:#}");
        std::process::exit(1);
    }
}

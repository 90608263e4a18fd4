use log::error;

fn main() {
    hubload::logging::init();

    if let Err(err) = hubload::run() {
        error!("{err}");
        std::process::exit(1);
    }
}

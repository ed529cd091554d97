use std::{env, error::Error};

use monoqr::QRBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let data = if args.is_empty() { "Hello, world! 🌏".to_string() } else { args.join(" ") };

    let qr = QRBuilder::new(&data).build()?;
    println!("{}", qr.to_str(1));

    Ok(())
}

use std::{env, path::Path, process::ExitCode};

use ditherpress::{config::DitherSettings, image_utils, run};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: ditherpress <input_image> <output_image> <config.json>");
        return ExitCode::FAILURE;
    }

    match process(&args[1], &args[2], &args[3]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ditherpress: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn process(input: &str, output: &str, config_path: &str) -> ditherpress::error::Result {
    let settings = DitherSettings::read_config(config_path)?;
    let image = image_utils::read_image(Path::new(input))?;

    let result = run(&settings, image)?;

    image_utils::write_image(
        &result,
        Path::new(output),
        settings.output_format,
        settings.gif_quality,
    )
}

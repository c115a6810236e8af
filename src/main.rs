//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use env_logger::Builder;
use log::Record;
use rastile_core::config::DEFAULT_CONFIG;
use std::env;
use std::io::Write;
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log_env = env::var("RUST_LOG");
    let rust_log = if args.value_of("loglevel").is_none() && rust_log_env.is_ok() {
        rust_log_env.as_ref().unwrap()
    } else {
        args.value_of("loglevel").unwrap_or("info")
    };
    builder.parse_filters(rust_log);

    builder.init();
}

#[cfg(feature = "with-gdal")]
mod console {
    use pbr::ProgressBar;
    use rastile_core::tiler::{Phase, Progress};
    use std::io::Stdout;

    /// Progress bar on stdout, one bar per generation phase
    pub struct ConsoleProgress {
        pb: Option<ProgressBar<Stdout>>,
    }

    impl ConsoleProgress {
        pub fn new() -> ConsoleProgress {
            ConsoleProgress { pb: None }
        }
    }

    impl Progress for ConsoleProgress {
        fn start_phase(&mut self, phase: Phase, total: u64) {
            if let Some(pb) = self.pb.as_mut() {
                pb.finish();
            }
            let mut pb = ProgressBar::new(total);
            pb.message(match phase {
                Phase::BaseTiles => "Base tiles: ",
                Phase::Overviews => "Overviews: ",
            });
            pb.show_speed = false;
            pb.show_time_left = false;
            pb.tick();
            self.pb = Some(pb);
        }
        fn tile_done(&mut self) {
            if let Some(pb) = self.pb.as_mut() {
                pb.inc();
            }
        }
        fn finish(&mut self) {
            if let Some(pb) = self.pb.as_mut() {
                pb.finish();
            }
        }
    }
}

#[cfg(feature = "with-gdal")]
fn generate(args: &ArgMatches<'_>) {
    use crate::console::ConsoleProgress;
    use rastile_core::config::{parse_config, parse_zoom_spec, read_config, ApplicationCfg};
    use rastile_core::store::{FileStore, TileStore};
    use rastile_core::tiler::{NoProgress, Progress};
    use std::path::Path;

    let config: ApplicationCfg = match args.value_of("config") {
        Some(path) => read_config(path),
        None => parse_config(DEFAULT_CONFIG.to_string(), "default"),
    }
    .unwrap_or_else(|err| {
        println!("Error reading configuration - {}", err);
        std::process::exit(1)
    });
    let input = args.value_of("INPUT").expect("Missing input raster");
    let zoom_spec = args
        .value_of("zoom")
        .map(|s| s.to_string())
        .or_else(|| config.tiling.zoom.clone())
        .expect("Missing zoom range");
    let (minzoom, maxzoom) =
        parse_zoom_spec(&zoom_spec).expect("Error parsing zoom range, e.g. 14 or 12-16");
    let basepath = args
        .value_of("output")
        .map(|s| s.to_string())
        .or_else(|| {
            config
                .cache
                .as_ref()
                .and_then(|cache| cache.file.as_ref())
                .map(|file_cfg| file_cfg.base.clone())
        })
        .unwrap_or_else(|| {
            // default: tile directory beside the input file
            Path::new(input)
                .with_extension("")
                .to_string_lossy()
                .to_string()
        });
    let store = FileStore { basepath };
    info!("{}", store.info());
    let show_progress = args.value_of("progress").map_or(true, |s| {
        s.parse::<bool>()
            .expect("Error parsing 'progress' as boolean value")
    });

    let mut console;
    let mut noop;
    let progress: &mut dyn Progress = if show_progress {
        console = ConsoleProgress::new();
        &mut console
    } else {
        noop = NoProgress;
        &mut noop
    };
    if let Err(err) = run_generate(input, config.tiling.tile_size, minzoom, maxzoom, &store, progress)
    {
        error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(feature = "with-gdal")]
fn run_generate(
    input: &str,
    tile_size: u32,
    minzoom: u8,
    maxzoom: u8,
    store: &rastile_core::store::FileStore,
    progress: &mut dyn rastile_core::tiler::Progress,
) -> rastile_core::errors::Result<()> {
    use mercator_grid::Mercator;
    use rastile_core::tiler::TilePyramid;
    use rastile_gdal::WarpedVrt;
    use std::path::Path;

    let vrt_path = env::temp_dir().join(format!("rastile_{}.vrt", std::process::id()));
    let vrt = WarpedVrt::create(Path::new(input), &vrt_path)?;
    let source = vrt.open()?;
    let mercator = Mercator::new(tile_size);
    let pyramid = TilePyramid::new(&source, mercator, minzoom, maxzoom)?;
    info!(
        "Generating {} base tiles and {} overview tiles",
        pyramid.base_tile_count(),
        pyramid.job().overview_tile_count()
    );
    pyramid.generate(|| vrt.open(), store, progress)
}

#[cfg(not(feature = "with-gdal"))]
fn generate(_args: &ArgMatches<'_>) {
    println!("Tile generation requires GDAL support. Rebuild with `--features with-gdal`");
}

#[cfg(feature = "with-gdal")]
fn version_info() -> String {
    format!(
        "{} (GDAL version {})",
        crate_version!(),
        rastile_gdal::gdal_version()
    )
}

#[cfg(not(feature = "with-gdal"))]
fn version_info() -> String {
    crate_version!().to_string()
}

fn main() {
    let version_info = version_info();
    let mut app = App::new("rastile")
        .version(&version_info as &str)
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Tile pyramid generator for georeferenced rasters")
        .subcommand(
            SubCommand::with_name("generate")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(
                    "<INPUT> 'Georeferenced input raster'
                          --output=[DIR] 'Tile directory (Default: input file name without extension)'
                          -c, --config=[FILE] 'Load from custom config file'
                          --zoom=[ZMIN-ZMAX] 'Zoom range, e.g. 14 or 12-16'
                          --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                          --progress=[true|false] 'Show progress bar'",
                )
                .about("Cut a tile pyramid from a raster"),
        )
        .subcommand(
            SubCommand::with_name("genconfig")
                .args_from_usage(
                    "--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'",
                )
                .about("Generate configuration template"),
        );

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("generate", Some(sub_m)) => {
                init_logger(sub_m);
                generate(sub_m);
            }
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", DEFAULT_CONFIG);
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}

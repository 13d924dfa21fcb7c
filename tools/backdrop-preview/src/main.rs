use std::{
    env, fs,
    path::{Path, PathBuf},
};

use canvas_backdrop::surface::svg::render_svg;
use canvas_backdrop::{
    BackdropEngine, CanvasTheme, EngineConfig, GridVariant, JitterMode, RecordingSurface, Viewport,
    DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
};

/// Minimal stderr sink for the engine's `log` output
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

struct Config {
    out_dir: PathBuf,
    width: u32,
    height: u32,
    seed: Option<u64>,
    theme: Option<String>,
    variant: Option<GridVariant>,
    zoom_start: f64,
    zoom_end: f64,
    frames: u32,
    pan_x: f64,
    pan_y: f64,
    config_file: Option<PathBuf>,
    jitter: Option<JitterMode>,
    verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("tools/backdrop-preview/out"),
            width: 1280,
            height: 720,
            seed: None,
            theme: None,
            variant: None,
            zoom_start: 0.25,
            zoom_end: 2.0,
            frames: 4,
            pan_x: 0.0,
            pan_y: 0.0,
            config_file: None,
            jitter: None,
            verbosity: 0,
        }
    }
}

fn main() -> Result<(), String> {
    let cfg = parse_args(env::args().skip(1))?;
    init_logging(cfg.verbosity);

    if cfg.width == 0 || cfg.height == 0 {
        return Err("width/height must be > 0".to_owned());
    }
    if cfg.frames == 0 {
        return Err("frames must be > 0".to_owned());
    }

    let (engine_config, theme) = build_engine_config(&cfg)?;
    let mut engine = BackdropEngine::new(engine_config).map_err(|e| e.to_string())?;
    if let Some(theme) = theme {
        engine.apply_theme(theme);
        let shade = if theme.is_dark() { "dark" } else { "light" };
        log::info!("theme {} on a {shade} canvas", theme.id);
    }

    fs::create_dir_all(&cfg.out_dir).map_err(|e| format!("create output dir: {e}"))?;

    for i in 0..cfg.frames {
        let zoom = zoom_for_frame(&cfg, i).clamp(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM);
        let viewport = Viewport::new(cfg.width, cfg.height)
            .with_pan(cfg.pan_x, cfg.pan_y)
            .with_zoom(zoom);

        let mut surface = RecordingSurface::new();
        let stats = engine
            .render(&mut surface, &viewport)
            .map_err(|e| format!("frame {i}: {e}"))?;

        let filename = format!(
            "backdrop_{}_{}_seed_{}_zoom_{:.3}.svg",
            theme.map_or("custom", |t| t.id),
            engine.style().variant.id(),
            engine.config().seed,
            zoom
        );
        let path = cfg.out_dir.join(filename);
        fs::write(&path, render_svg(&surface, cfg.width, cfg.height))
            .map_err(|e| format!("write {}: {e}", path.display()))?;

        let tier = stats.scene.map_or("off", |s| s.tier.id());
        println!(
            "wrote {} ({} paths, {} grid marks, tier {})",
            path.display(),
            surface.paths().len(),
            stats.grid.marks(),
            tier
        );
    }

    Ok(())
}

/// Engine config from the optional JSON file, with only the passed flags on top
///
/// A theme is resolved when `--theme` was given, or when there is no config
/// file to take colors from. Without a file the preview jitter is seeded so
/// repeated runs write identical frames.
fn build_engine_config(
    cfg: &Config,
) -> Result<(EngineConfig, Option<&'static CanvasTheme>), String> {
    let mut engine_config = match &cfg.config_file {
        Some(path) => {
            let json =
                fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
            EngineConfig::from_json(&json).map_err(|e| format!("config {}: {e}", path.display()))?
        }
        None => EngineConfig::default().with_jitter(JitterMode::Seeded),
    };
    if let Some(seed) = cfg.seed {
        engine_config.seed = seed;
    }
    if let Some(jitter) = cfg.jitter {
        engine_config.jitter = jitter;
    }
    if let Some(variant) = cfg.variant {
        engine_config.style.variant = variant;
    }

    let theme = match (&cfg.theme, &cfg.config_file) {
        (Some(id), _) => {
            let theme = CanvasTheme::from_id(id).ok_or_else(|| unknown_theme(id))?;
            Some(theme)
        }
        (None, None) => Some(CanvasTheme::default_theme()),
        (None, Some(_)) => None,
    };
    Ok((engine_config, theme))
}

fn unknown_theme(id: &str) -> String {
    let ids: Vec<&str> = CanvasTheme::all().iter().map(|t| t.id).collect();
    format!("unknown theme {id}, expected one of {}", ids.join("|"))
}

/// Geometric interpolation so each octave gets the same number of frames
fn zoom_for_frame(cfg: &Config, i: u32) -> f64 {
    if cfg.frames == 1 {
        return cfg.zoom_start;
    }
    let t = i as f64 / (cfg.frames - 1) as f64;
    let (a, b) = (cfg.zoom_start.log2(), cfg.zoom_end.log2());
    (a + (b - a) * t).exp2()
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn parse_args<I>(args: I) -> Result<Config, String>
where
    I: IntoIterator<Item = String>,
{
    let mut cfg = Config::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--out" => cfg.out_dir = PathBuf::from(next_value("--out", &mut it)?),
            "--width" => cfg.width = parse_num("--width", &mut it)?,
            "--height" => cfg.height = parse_num("--height", &mut it)?,
            "--seed" => cfg.seed = Some(parse_num("--seed", &mut it)?),
            "--theme" => cfg.theme = Some(next_value("--theme", &mut it)?),
            "--variant" => {
                let raw = next_value("--variant", &mut it)?;
                let variant = GridVariant::from_id(&raw)
                    .ok_or_else(|| format!("--variant must be dots|lines, got {raw}"))?;
                cfg.variant = Some(variant);
            }
            "--zoom" => {
                let zoom = parse_zoom("--zoom", &mut it)?;
                cfg.zoom_start = zoom;
                cfg.zoom_end = zoom;
                cfg.frames = 1;
            }
            "--zoom-start" => cfg.zoom_start = parse_zoom("--zoom-start", &mut it)?,
            "--zoom-end" => cfg.zoom_end = parse_zoom("--zoom-end", &mut it)?,
            "--frames" => cfg.frames = parse_num("--frames", &mut it)?,
            "--pan-x" => cfg.pan_x = parse_num("--pan-x", &mut it)?,
            "--pan-y" => cfg.pan_y = parse_num("--pan-y", &mut it)?,
            "--config" => cfg.config_file = Some(PathBuf::from(next_value("--config", &mut it)?)),
            "--jitter" => {
                let raw = next_value("--jitter", &mut it)?;
                let jitter = JitterMode::from_id(&raw)
                    .ok_or_else(|| format!("--jitter must be off|seeded|entropy, got {raw}"))?;
                cfg.jitter = Some(jitter);
            }
            "-v" => cfg.verbosity = cfg.verbosity.saturating_add(1),
            "-vv" => cfg.verbosity = cfg.verbosity.saturating_add(2),
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(format!("unknown arg: {arg}")),
        }
    }
    Ok(cfg)
}

fn next_value<I>(flag: &str, it: &mut I) -> Result<String, String>
where
    I: Iterator<Item = String>,
{
    it.next().ok_or_else(|| format!("missing value for {flag}"))
}

fn parse_num<T, I>(flag: &str, it: &mut I) -> Result<T, String>
where
    T: core::str::FromStr,
    I: Iterator<Item = String>,
{
    let raw = next_value(flag, it)?;
    raw.parse::<T>()
        .map_err(|_| format!("invalid numeric value for {flag}: {raw}"))
}

fn parse_zoom<I>(flag: &str, it: &mut I) -> Result<f64, String>
where
    I: Iterator<Item = String>,
{
    let zoom: f64 = parse_num(flag, it)?;
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(format!("{flag} must be > 0"));
    }
    Ok(zoom)
}

fn print_help() {
    let exe = env::args()
        .next()
        .and_then(|p| {
            Path::new(&p)
                .file_name()
                .and_then(|n| n.to_str())
                .map(|s| s.to_owned())
        })
        .unwrap_or_else(|| "backdrop-preview".to_owned());
    println!(
        "Usage: {exe} [options]\n\
         \n\
         Options:\n\
         \x20 --out <dir>          output directory (default tools/backdrop-preview/out)\n\
         \x20 --width <px>         frame width (default 1280)\n\
         \x20 --height <px>        frame height (default 720)\n\
         \x20 --seed <n>           world seed (default 42, or the config file's)\n\
         \x20 --theme <id>         canvas theme (default light without --config)\n\
         \x20 --variant <v>        dots|lines (default dots, or the config file's)\n\
         \x20 --zoom <z>           render a single frame at this zoom\n\
         \x20 --zoom-start <z>     first zoom of the sweep (default 0.25)\n\
         \x20 --zoom-end <z>       last zoom of the sweep (default 2.0)\n\
         \x20 --frames <n>         frames in the sweep (default 4)\n\
         \x20 --pan-x <w>          horizontal pan in world units\n\
         \x20 --pan-y <w>          vertical pan in world units\n\
         \x20 --config <file>      engine config JSON\n\
         \x20 --jitter <mode>      off|seeded|entropy (default seeded without --config)\n\
         \x20 -v, -vv              more log output on stderr"
    );
}

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use multiview::{
    AudioBlock, AudioOutput, Canvas, CpuBackend, CpuSettings, LabelFactory, LayoutKind,
    MemoryAudioOutput, MemoryLabelFactory, MemorySceneHost, Multiview, MultiviewConfig, Point,
    SceneHost, Style, execute_plan, mix_for_mask,
};

#[derive(Parser, Debug)]
#[command(name = "multiview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a synthetic multiview frame as a PNG.
    Frame(FrameArgs),
    /// Print the frame plan as JSON.
    Plan(PlanArgs),
    /// Hit-test a pointer position against the grid.
    Locate(LocateArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Grid configuration, e.g. `horizontal_top_8_scenes` or `scenes_only_9_scenes`.
    #[arg(long)]
    layout: Option<LayoutKind>,

    /// Multiview config JSON; `--layout` and the toggles below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Style JSON (colors, border thickness, meter constants).
    #[arg(long)]
    style: Option<PathBuf>,

    /// Output (canvas) width.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Output (canvas) height.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Number of synthetic scenes.
    #[arg(long, default_value_t = 8)]
    scenes: usize,

    /// Enable split preview/program mode (scene 2 on preview, scene 1 on program).
    #[arg(long, default_value_t = false)]
    split: bool,

    #[arg(long, default_value_t = false)]
    no_labels: bool,

    #[arg(long, default_value_t = false)]
    safe_area: bool,

    #[arg(long, default_value_t = false)]
    meter: bool,

    /// Output track bitmask for the meter.
    #[arg(long)]
    tracks: Option<u32>,

    /// Feed a full-scale stereo block of this amplitude to the meter before drawing.
    #[arg(long)]
    tone: Option<f32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    session: SessionArgs,

    #[arg(long, default_value_t = 1920)]
    window_width: u32,

    #[arg(long, default_value_t = 1080)]
    window_height: u32,
}

#[derive(Parser, Debug)]
struct LocateArgs {
    #[command(flatten)]
    session: SessionArgs,

    #[arg(long)]
    x: f64,

    #[arg(long)]
    y: f64,

    #[arg(long, default_value_t = 1920)]
    window_width: u32,

    #[arg(long, default_value_t = 1080)]
    window_height: u32,
}

struct Session {
    host: Arc<MemorySceneHost>,
    audio: Arc<MemoryAudioOutput>,
    mv: Multiview,
    tone: Option<f32>,
}

impl Session {
    fn open(args: &SessionArgs) -> anyhow::Result<Self> {
        let canvas = Canvas::new(args.width, args.height)?;
        let host = Arc::new(MemorySceneHost::with_scenes(canvas, args.scenes));
        let ids = host.scenes();
        host.set_program(ids.first().copied());
        host.set_preview(ids.get(1).or(ids.first()).copied());
        host.set_preview_program_mode(args.split);

        let style = match &args.style {
            Some(path) => Style::load_json(path)
                .with_context(|| format!("load style '{}'", path.display()))?,
            None => Style::default(),
        };
        let mut config = match &args.config {
            Some(path) => MultiviewConfig::load_json(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => MultiviewConfig::default(),
        };
        if let Some(layout) = args.layout {
            config.layout = layout;
        }
        config.show_labels &= !args.no_labels;
        config.show_safe_area |= args.safe_area;
        config.show_meter |= args.meter;
        if let Some(tracks) = args.tracks {
            config.selected_tracks = tracks;
        }

        let audio = Arc::new(MemoryAudioOutput::new());
        let scene_host: Arc<dyn SceneHost> = host.clone();
        let labels: Arc<dyn LabelFactory> = Arc::new(MemoryLabelFactory::new());
        let audio_out: Arc<dyn AudioOutput> = audio.clone();
        let mut mv = Multiview::new(scene_host, labels, audio_out, style);
        mv.configure(config).context("configure multiview")?;

        Ok(Self {
            host,
            audio,
            mv,
            tone: args.tone,
        })
    }

    fn plan(&mut self, window_width: u32, window_height: u32) -> multiview::FramePlan {
        let plan = self.mv.render_frame(window_width, window_height);
        let Some(amplitude) = self.tone else {
            return plan;
        };
        // The first frame subscribes the meter; feed it and draw again.
        let samples = vec![amplitude; 480];
        let planes = [Some(samples.as_slice()), Some(samples.as_slice())];
        let mix = mix_for_mask(self.mv.meter().selected_tracks());
        self.audio.deliver(
            mix,
            &AudioBlock {
                frames: samples.len(),
                planes: &planes,
            },
        );
        self.mv.render_frame(window_width, window_height)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Locate(args) => cmd_locate(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = Session::open(&args.session)?;
    let plan = session.plan(args.session.width, args.session.height);
    let mut backend = CpuBackend::new(CpuSettings::default());
    let frame = execute_plan(&mut backend, &plan).context("rasterize frame")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let mut session = Session::open(&args.session)?;
    let plan = session.plan(args.window_width, args.window_height);
    let json = serde_json::to_string_pretty(&plan).context("serialize plan")?;
    println!("{json}");
    Ok(())
}

fn cmd_locate(args: LocateArgs) -> anyhow::Result<()> {
    let session = Session::open(&args.session)?;
    let hit = session.mv.locate_in(
        Point::new(args.x, args.y),
        args.window_width,
        args.window_height,
    );
    match hit {
        Some(scene) => {
            let name = session.host.scene_name(scene).unwrap_or_default();
            println!("{} {name}", scene.0);
        }
        None => println!("none"),
    }
    Ok(())
}

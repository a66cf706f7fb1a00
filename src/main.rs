//! noisetex CLI - Procedural noise texture generator.
//!
//! Generates the Perlin and fractal noise textures sampled by the rendering
//! shaders. Running without a subcommand writes the standard texture set.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use noisetex::export::{raw_texture_size, BitDepth, PngExportOptions, RangePolicy};
use noisetex::field::{Resolution, Shape};
use noisetex::pipeline::{
    GeneratedTexture, Manifest, NoiseKind, RunOptions, TextureSet, TextureSpec,
    DEFAULT_OUTPUT_DIR, DEFAULT_TEXTURE_SIZE, MANIFEST_FILE_NAME,
};

/// Procedural noise texture generator.
#[derive(Parser)]
#[command(name = "noisetex")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the standard texture set (basic, fractal, shimmer).
    Generate(GenerateArgs),

    /// Generate a single texture with custom parameters.
    Single(SingleArgs),

    /// Display the texture set and its size requirements.
    Info {
        /// Override the pixel size of every texture.
        #[arg(long)]
        size: Option<u32>,
    },
}

#[derive(Args)]
struct ExportArgs {
    /// Output directory for generated files.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write 16-bit grayscale instead of 8-bit.
    #[arg(long)]
    sixteen_bit: bool,

    /// Clamp out-of-range samples instead of failing.
    #[arg(long)]
    clamp: bool,
}

impl ExportArgs {
    fn png_options(&self) -> PngExportOptions {
        PngExportOptions {
            bit_depth: if self.sixteen_bit { BitDepth::Sixteen } else { BitDepth::Eight },
            range_policy: if self.clamp { RangePolicy::Clamp } else { RangePolicy::Reject },
            ..Default::default()
        }
    }
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    export: ExportArgs,

    /// Override the pixel size (width and height) of every texture.
    #[arg(long)]
    size: Option<u32>,

    /// Generate textures in parallel.
    #[arg(long)]
    parallel: bool,

    /// Regenerate the textures recorded in a manifest file.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Skip writing the manifest next to the textures.
    #[arg(long)]
    no_manifest: bool,
}

#[derive(Args)]
struct SingleArgs {
    #[command(flatten)]
    export: ExportArgs,

    /// Texture name; the file is written as `<name>.png`.
    #[arg(short, long)]
    name: String,

    /// Noise kind.
    #[arg(short, long, default_value = "fractal")]
    kind: KindArg,

    /// Width in pixels.
    #[arg(long, default_value_t = DEFAULT_TEXTURE_SIZE)]
    width: u32,

    /// Height in pixels.
    #[arg(long, default_value_t = DEFAULT_TEXTURE_SIZE)]
    height: u32,

    /// Gradient cells along x.
    #[arg(long, default_value = "8")]
    res_x: u32,

    /// Gradient cells along y.
    #[arg(long, default_value = "8")]
    res_y: u32,

    /// Number of octaves (fractal only).
    #[arg(long, default_value = "5")]
    octaves: u32,

    /// Amplitude decay per octave (fractal only).
    #[arg(long, default_value = "0.5")]
    persistence: f32,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    /// Single-octave Perlin noise.
    Perlin,
    /// Multi-octave fractal noise.
    Fractal,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate(args)) => run_generate(args),
        Some(Commands::Single(args)) => run_single(args),
        Some(Commands::Info { size }) => run_info(size),
        None => run_generate(cli.generate),
    }
}

/// Uses the given seed or derives one from the clock.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

fn print_saved(texture: &GeneratedTexture) {
    println!("  Saved noise texture to {}", texture.path.display());
}

fn run_generate(args: GenerateArgs) {
    let (mut set, seed) = match &args.manifest {
        Some(path) => {
            let manifest = Manifest::load(path).unwrap_or_else(|e| {
                eprintln!("Error loading manifest: {}", e);
                std::process::exit(1);
            });
            let seed = args.export.seed.unwrap_or(manifest.seed);
            (manifest.texture_set(), seed)
        }
        None => (TextureSet::default_set(), resolve_seed(args.export.seed)),
    };

    if let Some(size) = args.size {
        if size == 0 {
            eprintln!("Error: Size must be at least 1");
            std::process::exit(1);
        }
        set = set.with_shape(Shape::square(size));
    }

    println!("noisetex - Noise Texture Generator");
    println!("==================================");
    println!("Textures: {}", set.len());
    println!("Seed: {}", seed);
    println!("Output: {}", args.export.output.display());
    if let Some(path) = &args.manifest {
        println!("Manifest: {}", path.display());
    }

    let options = RunOptions {
        png: args.export.png_options(),
        parallel: args.parallel,
        write_manifest: !args.no_manifest,
    };

    println!("\nGenerating noise textures...");
    let start = Instant::now();

    set.run(&args.export.output, seed, &options, print_saved)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    if options.write_manifest {
        println!("  Wrote {}", args.export.output.join(MANIFEST_FILE_NAME).display());
    }
    println!("Noise texture generation complete in {:.2?}", start.elapsed());
}

fn run_single(args: SingleArgs) {
    let seed = resolve_seed(args.export.seed);
    let kind = match args.kind {
        KindArg::Perlin => NoiseKind::Perlin,
        KindArg::Fractal => NoiseKind::fractal(args.octaves, args.persistence),
    };
    let spec = TextureSpec::new(
        &args.name,
        &format!("{}.png", args.name),
        Shape::new(args.width, args.height),
        Resolution::new(args.res_x, args.res_y),
        kind,
    );

    println!("noisetex - Single Texture");
    println!("=========================");
    println!("Texture: {} ({})", spec.name, spec.describe());
    println!("Seed: {}", seed);

    let options = RunOptions {
        png: args.export.png_options(),
        ..Default::default()
    };

    let start = Instant::now();
    TextureSet::new(vec![spec])
        .run(&args.export.output, seed, &options, print_saved)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    println!("Done in {:.2?}", start.elapsed());
}

fn run_info(size: Option<u32>) {
    let mut set = TextureSet::default_set();
    if let Some(size) = size {
        set = set.with_shape(Shape::square(size));
    }

    println!("noisetex - Texture Set Info");
    println!("===========================");
    println!();

    for spec in &set.textures {
        let finest = spec.kind.finest_resolution(spec.res);
        let pixels = (spec.shape.width as u64) * (spec.shape.height as u64);
        let raw8 = raw_texture_size(spec.shape.width, spec.shape.height, BitDepth::Eight);
        let raw16 = raw_texture_size(spec.shape.width, spec.shape.height, BitDepth::Sixteen);

        println!("{} -> {}", spec.name, spec.file_name);
        println!("  Parameters:  {}", spec.describe());
        match finest {
            Some(res) => println!("  Finest grid: {} (shape must be a multiple of this)", res),
            None => println!("  Finest grid: overflows"),
        }
        println!("  Pixels:      {:>10}", pixels);
        println!("  Raw size:    {:>10} bytes (8-bit), {} bytes (16-bit)", raw8, raw16);
        match spec.validate() {
            Ok(()) => println!("  Status:      OK"),
            Err(e) => println!("  Status:      INVALID ({})", e),
        }
        if !(is_power_of_two(spec.shape.width) && is_power_of_two(spec.shape.height)) {
            println!("  Note:        non power-of-2 textures may not mipmap on older GPUs");
        }
        println!();
    }
}

fn is_power_of_two(n: u32) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

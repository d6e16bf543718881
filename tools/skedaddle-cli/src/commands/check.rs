//! Check system capabilities.

use skedaddle_encoder::process::command_exists;

pub fn run() -> anyhow::Result<()> {
    println!("Skedaddle System Check");
    println!("{}", "=".repeat(50));

    if command_exists("ffmpeg") {
        println!("[OK] ffmpeg found in PATH");
    } else {
        println!("[MISSING] ffmpeg not found in PATH");
        print_install_hints();
        anyhow::bail!("ffmpeg is required to encode transmissions");
    }

    if command_exists("ffprobe") {
        println!("[OK] ffprobe found in PATH");
    } else {
        println!("[WARN] ffprobe not found (optional, useful for inspecting output)");
    }

    println!();
    println!("All required capabilities are available. Skedaddle is ready.");
    Ok(())
}

pub fn print_install_hints() {
    println!();
    println!("Skedaddle requires ffmpeg. To install it:");
    println!("  Ubuntu/Debian: sudo apt install ffmpeg");
    println!("  Fedora:        sudo dnf install ffmpeg");
    println!("  Arch:          sudo pacman -S ffmpeg");
    println!("  macOS:         brew install ffmpeg");
    println!();
    println!("See https://ffmpeg.org for more information.");
}

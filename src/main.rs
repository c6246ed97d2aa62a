#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tracescope::app;

fn parse_startup_config() -> app::StartupConfig {
    let mut cfg = app::StartupConfig {
        channels: 2,
        ..Default::default()
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--channels" => {
                if let Some(v) = args.next() {
                    if let Ok(n) = v.parse::<usize>() {
                        cfg.channels = n.max(1);
                    }
                }
            }
            "--synth" => {
                cfg.synth = true;
            }
            "--time-scale" => {
                if let Some(v) = args.next() {
                    if let Ok(t) = v.parse::<f32>() {
                        cfg.time_scale = Some(t);
                    }
                }
            }
            other => {
                eprintln!("unknown argument: {other}");
            }
        }
    }
    cfg
}

fn main() -> eframe::Result<()> {
    let startup = parse_startup_config();
    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size([800.0, 480.0])
        .with_inner_size([1280.0, 720.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "tracescope",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(
                app::ScopeApp::new(cc, startup.clone()).expect("failed to init app"),
            ))
        }),
    )
}

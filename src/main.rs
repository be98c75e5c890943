use std::process::ExitCode;

use winit::event_loop::{ControlFlow, EventLoop};

use pointmorph::App;

/// Fixed for the session; changing it means restarting with fresh buffers.
const PARTICLE_COUNT: usize = 30_000;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), pointmorph::AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(PARTICLE_COUNT)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}

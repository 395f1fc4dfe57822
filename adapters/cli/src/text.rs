use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use tower_blast_rendering::{Renderer, Scene};

/// Renderer that prints a compact textual frame per presentation.
#[derive(Debug)]
pub(crate) struct TextRenderer<W> {
    out: W,
    frames: u64,
    verbose: bool,
}

impl<W> TextRenderer<W>
where
    W: Write,
{
    /// Creates a renderer writing to `out`. Verbose frames list every tower and enemy.
    pub(crate) fn new(out: W, verbose: bool) -> Self {
        Self {
            out,
            frames: 0,
            verbose,
        }
    }

    /// Consumes the renderer and returns the underlying writer.
    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W> Renderer for TextRenderer<W>
where
    W: Write,
{
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        self.frames += 1;
        writeln!(
            self.out,
            "#{:<5} {} | towers {} | enemies {}",
            self.frames,
            scene.hud_text(),
            scene.towers.len(),
            scene.enemies.len()
        )
        .context("failed to write frame")?;

        if self.verbose {
            let route: Vec<String> = scene
                .path
                .iter()
                .map(|point| format!("({:.1}, {:.1})", point.x, point.y))
                .collect();
            writeln!(
                self.out,
                "    path {} stroke {}",
                route.join(" -> "),
                scene.path_color.to_hex()
            )
            .context("failed to write path")?;

            for tower in &scene.towers {
                writeln!(
                    self.out,
                    "    {} tower #{} at ({:.1}, {:.1}) range {} fill {}",
                    tower.kind,
                    tower.id.get(),
                    tower.position.x,
                    tower.position.y,
                    tower.range,
                    tower.color.to_hex()
                )
                .context("failed to write tower")?;
            }
            for enemy in &scene.enemies {
                writeln!(
                    self.out,
                    "    enemy #{} at ({:.1}, {:.1}) hp {} fill {}",
                    enemy.id.get(),
                    enemy.position.x,
                    enemy.position.y,
                    enemy.label(),
                    enemy.color.to_hex()
                )
                .context("failed to write enemy")?;
            }
        }

        if let Some(banner) = scene.banner() {
            writeln!(self.out, "{banner}").context("failed to write banner")?;
        }

        self.out.flush().context("failed to flush frame")
    }
}

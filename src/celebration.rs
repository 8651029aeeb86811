use rand::Rng;

use crate::medal::Tier;

/// Retro palette: neon, pink, yellow, white.
pub const PALETTE: [(u8, u8, u8); 4] = [
    (105, 255, 204),
    (255, 79, 216),
    (255, 224, 107),
    (232, 240, 255),
];

/// Seconds a confetti pixel stays on screen.
const PIXEL_LIFETIME: f64 = 0.9;
/// Seconds the tier name stays on screen.
const TEXT_LIFETIME: f64 = 2.0;
const GRAVITY: f64 = 30.0;
/// Fixed animation timestep, one frame of the runner.
pub const FRAME_DT: f64 = 0.1;

/// One pixel of confetti, or one letter of the tier banner.
#[derive(Debug, Clone)]
pub struct ConfettiPixel {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    pub is_text: bool, // letters glide to a fixed spot instead of falling
    pub target_x: f64,
    pub target_y: f64,
}

impl ConfettiPixel {
    fn new<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x: x + rng.gen_range(-2.0..2.0),
            y: y + rng.gen_range(-0.5..0.5),
            vel_x: rng.gen_range(-20.0..20.0),
            vel_y: rng.gen_range(-12.0..-2.0),
            symbol: '▪',
            color_index: rng.gen_range(0..PALETTE.len()),
            age: 0.0,
            max_age: PIXEL_LIFETIME,
            is_text: false,
            target_x: x,
            target_y: y,
        }
    }

    fn new_letter(x: f64, y: f64, target_x: f64, target_y: f64, symbol: char, color: usize) -> Self {
        Self {
            x,
            y,
            vel_x: (target_x - x) * 2.0,
            vel_y: (target_y - y) * 2.0,
            symbol,
            color_index: color,
            age: 0.0,
            max_age: TEXT_LIFETIME,
            is_text: true,
            target_x,
            target_y,
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        if self.is_text {
            let dist_to_target =
                ((self.target_x - self.x).powi(2) + (self.target_y - self.y).powi(2)).sqrt();
            if dist_to_target > 0.5 {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_x *= 0.9;
                self.vel_y *= 0.9;
            } else {
                self.x = self.target_x;
                self.y = self.target_y;
                self.vel_x = 0.0;
                self.vel_y = 0.0;
            }
        } else {
            self.x += self.vel_x * dt;
            self.y += self.vel_y * dt;
            self.vel_y += GRAVITY * dt;
        }

        self.age += dt;
        self.age < self.max_age
    }
}

/// Confetti burst played when a round ends. Bigger medals throw more pixels.
#[derive(Debug)]
pub struct CelebrationAnimation {
    pub particles: Vec<ConfettiPixel>,
    pub is_active: bool,
    pub width: f64,
    pub height: f64,
}

impl CelebrationAnimation {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            is_active: false,
            width: 80.0,
            height: 24.0,
        }
    }

    /// Throw confetti for `tier` from a point a third of the way down the area.
    pub fn burst(&mut self, tier: Tier, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.is_active = true;
        self.width = width as f64;
        self.height = height as f64;

        let origin_x = self.width * 0.5;
        let origin_y = self.height * 0.35;

        for _ in 0..tier.burst_intensity() {
            self.particles
                .push(ConfettiPixel::new(origin_x, origin_y, &mut rng));
        }

        if tier.is_medal() {
            let word = format!("{}!", tier.to_string().to_uppercase());
            self.spell(&word, origin_x, origin_y - 2.0, &mut rng);
        }
    }

    fn spell<R: Rng>(&mut self, text: &str, center_x: f64, y: f64, rng: &mut R) {
        let char_width = 2.0;
        let text_width = (text.chars().count() as f64 - 1.0) * char_width;
        let start_x = center_x - text_width / 2.0;

        for (i, ch) in text.chars().enumerate() {
            let target_x = start_x + (i as f64 * char_width);
            let from_x = center_x + rng.gen_range(-6.0..6.0);
            let from_y = y + rng.gen_range(-3.0..3.0);
            let color = rng.gen_range(0..PALETTE.len());
            self.particles
                .push(ConfettiPixel::new_letter(from_x, from_y, target_x, y, ch, color));
        }
    }

    /// Advance one frame. Pixels that leave the area are dropped early.
    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }

        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            let alive = p.update(FRAME_DT);
            if p.is_text {
                alive
            } else {
                let buffer = 2.0;
                let off_screen = p.y > height + buffer || p.x < -buffer || p.x > width + buffer;
                alive && !off_screen
            }
        });

        if self.particles.is_empty() {
            self.is_active = false;
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.is_active = false;
    }
}

impl Default for CelebrationAnimation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_size_follows_tier() {
        let mut anim = CelebrationAnimation::new();
        anim.burst(Tier::None, 80, 24);
        assert!(anim.is_active);
        assert_eq!(anim.particles.len(), 14);
        assert!(anim.particles.iter().all(|p| !p.is_text));

        anim.burst(Tier::Gold, 80, 24);
        let pixels = anim.particles.iter().filter(|p| !p.is_text).count();
        let letters: String = anim
            .particles
            .iter()
            .filter(|p| p.is_text)
            .map(|p| p.symbol)
            .collect();
        assert_eq!(pixels, 42);
        assert_eq!(letters, "GOLD!");
    }

    #[test]
    fn pixels_fall_under_gravity() {
        let mut rng = rand::thread_rng();
        let mut p = ConfettiPixel::new(10.0, 10.0, &mut rng);
        let vel_before = p.vel_y;
        assert!(p.update(FRAME_DT));
        assert!(p.vel_y > vel_before);
    }

    #[test]
    fn letters_settle_on_target() {
        let mut p = ConfettiPixel::new_letter(0.0, 0.0, 6.0, 3.0, 'S', 0);
        for _ in 0..15 {
            p.update(FRAME_DT);
        }
        let dist = ((p.target_x - p.x).powi(2) + (p.target_y - p.y).powi(2)).sqrt();
        assert!(dist < 3.0, "letter still {dist} away");
    }

    #[test]
    fn animation_winds_down() {
        let mut anim = CelebrationAnimation::new();
        anim.burst(Tier::Silver, 40, 20);
        for _ in 0..40 {
            anim.update();
        }
        assert!(!anim.is_active);
        assert!(anim.particles.is_empty());
    }

    #[test]
    fn off_screen_pixels_are_dropped() {
        let mut anim = CelebrationAnimation::new();
        anim.burst(Tier::None, 20, 10);
        let mut rng = rand::thread_rng();
        anim.particles.push(ConfettiPixel::new(200.0, 200.0, &mut rng));
        anim.update();
        assert!(anim.particles.iter().all(|p| p.x < 100.0));
    }
}

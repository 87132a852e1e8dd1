use pixtrack::{HitIndex, HitPool, Track};

/// Straight line `x = x0 + tx z`, `y = y0 + ty z`
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub tx: f32,
    pub ty: f32,
    pub x0: f32,
    pub y0: f32,
}

/// Fill `pool` with one hit per module, exactly on `line`, modules every `pitch` in z.
///
/// Returns the indices of the new hits, ordered by increasing z.
pub fn hits_on_line(
    pool: &mut HitPool,
    line: Line,
    nb_modules: u32,
    pitch: f32,
    first_id: i32,
) -> Vec<HitIndex> {
    (0..nb_modules)
        .map(|module| {
            let z = module as f32 * pitch;
            pool.push_hit(
                first_id + module as i32,
                line.x0 + line.tx * z,
                line.y0 + line.ty * z,
                z,
                20.0,
                20.0,
                module,
            )
        })
        .collect()
}

/// Seed on the first two indices and append the others, without refitting.
pub fn build_track(pool: &HitPool, indices: &[HitIndex]) -> Track {
    let mut track = Track::seed(pool, indices[0], indices[1]).unwrap();
    for &index in &indices[2..] {
        track.add_hit(index);
    }
    track
}

pub const EARTH_RADIUS_KM: f64 = 6378.137;

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

pub fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

/// Azimuth (degrees east of north, [0, 360)), elevation (degrees) and range
/// (km) of `target` seen from `origin`, both ECEF.
pub fn look_angles(
    origin: [f64; 3],
    target: [f64; 3],
    lat_rad: f64,
    lon_rad: f64,
) -> (f64, f64, f64) {
    let dr = sub(target, origin);
    let range_km = norm(dr);
    let enu = ecef_to_enu(dr, lat_rad, lon_rad);
    let azimuth = enu.0.atan2(enu.1).to_degrees().rem_euclid(360.0);
    let elevation = if range_km > 0.0 {
        (enu.2 / range_km).asin().to_degrees()
    } else {
        0.0
    };
    (azimuth, elevation, range_km)
}

pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Angle between two vectors in degrees.
pub fn angle_between_deg(a: [f64; 3], b: [f64; 3]) -> f64 {
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        return 0.0;
    }
    (dot(a, b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// True when the segment from `sat` toward `sun` passes through the Earth
/// (spherical, geocentre at the origin).
pub fn in_earth_shadow(sat: [f64; 3], sun: [f64; 3]) -> bool {
    let to_sun = sub(sun, sat);
    let len = norm(to_sun);
    if len == 0.0 {
        return false;
    }
    let d = [to_sun[0] / len, to_sun[1] / len, to_sun[2] / len];
    let b = dot(sat, d);
    let c = dot(sat, sat) - EARTH_RADIUS_KM * EARTH_RADIUS_KM;
    if c <= 0.0 {
        // below the surface
        return true;
    }
    b < 0.0 && b * b - c >= 0.0
}

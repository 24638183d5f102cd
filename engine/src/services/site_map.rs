use crate::api::{SiteMapData, SiteMarker};
use crate::core::domain::Project;
use crate::store::repository::PortfolioRepository;

/// Compute the map view model.
///
/// Projects without site coordinates are counted but produce no marker.
/// Bounds collapse to zero when nothing is located; the frontend falls
/// back to its default viewport in that case.
pub fn compute_site_map(projects: &[Project]) -> SiteMapData {
    let markers: Vec<SiteMarker> = projects
        .iter()
        .filter_map(|project| {
            project.site.map(|site| SiteMarker {
                project_id: project.project_id.clone(),
                name: project.name.clone(),
                lat: site.lat,
                lon: site.lon,
                stage: project.stage.label().to_string(),
                value_bin: project.value_bin().to_string(),
            })
        })
        .collect();

    let unlocated_count = projects.len() - markers.len();

    let (mut lat_min, mut lat_max) = (f64::MAX, f64::MIN);
    let (mut lon_min, mut lon_max) = (f64::MAX, f64::MIN);
    for marker in &markers {
        lat_min = lat_min.min(marker.lat);
        lat_max = lat_max.max(marker.lat);
        lon_min = lon_min.min(marker.lon);
        lon_max = lon_max.max(marker.lon);
    }

    if markers.is_empty() {
        lat_min = 0.0;
        lat_max = 0.0;
        lon_min = 0.0;
        lon_max = 0.0;
    }

    SiteMapData {
        markers,
        lat_min,
        lat_max,
        lon_min,
        lon_max,
        unlocated_count,
    }
}

/// Get the map view for the current store contents.
pub fn get_site_map(repo: &dyn PortfolioRepository) -> Result<SiteMapData, String> {
    let projects = repo.list_projects().map_err(|e| e.to_string())?;
    Ok(compute_site_map(&projects))
}

//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Warped VRT intermediate in the tile grid projection

use crate::gdal_source::GdalRaster;
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};
use rastile_core::errors::{Error, Result};
use std::ffi::CString;
use std::fs;
use std::path::{Path, PathBuf};
use std::ptr;

/// Source raster warped to EPSG:3857, persisted as a VRT file so that each
/// worker thread can open an independent handle on it.
///
/// The file is removed when the job finishes; generated tiles are never
/// cleaned up.
pub struct WarpedVrt {
    path: PathBuf,
}

/// Rewrite the serialized warp options so the reprojection collar reads as
/// nodata: initialize destination pixels to the nodata value and treat the
/// source nodata per dataset instead of per band. `NODATA_VALUES` dataset
/// metadata then makes band masks report those pixels as invalid.
///
/// `GDALAutoCreateWarpedVRT` offers no hook for these options, so they are
/// patched into the VRT file, which is plain XML with exactly one
/// `GDALWarpOptions` element.
fn patch_nodata_options(vrt: &str) -> Result<String> {
    let invalid = |what: &str| Error::RasterOpen(format!("no {} element in warped VRT", what));
    let marker = "<GDALWarpOptions>";
    let options_at = vrt.find(marker).ok_or_else(|| invalid("GDALWarpOptions"))? + marker.len();
    let root_at = vrt.find("<VRTDataset").ok_or_else(|| invalid("VRTDataset"))?;
    let metadata_at = root_at
        + vrt[root_at..]
            .find('>')
            .ok_or_else(|| invalid("VRTDataset"))?
        + 1;

    let mut patched = String::with_capacity(vrt.len() + 256);
    patched.push_str(&vrt[..metadata_at]);
    patched.push_str("<Metadata><MDI key=\"NODATA_VALUES\">0 0 0 0</MDI></Metadata>");
    patched.push_str(&vrt[metadata_at..options_at]);
    patched.push_str("<Option name=\"INIT_DEST\">NO_DATA</Option>");
    patched.push_str("<Option name=\"UNIFIED_SRC_NODATA\">YES</Option>");
    patched.push_str(&vrt[options_at..]);
    Ok(patched)
}

impl WarpedVrt {
    /// Validate the source georeferencing and write the warped VRT.
    ///
    /// Rasters georeferenced with ground control points are rejected, as
    /// are rasters without an affine geotransform.
    pub fn create(src: &Path, vrt_path: &Path) -> Result<WarpedVrt> {
        let dataset =
            Dataset::open(src).map_err(|e| Error::RasterOpen(format!("{}: {}", src.display(), e)))?;
        let gcp_count = unsafe { gdal_sys::GDALGetGCPCount(dataset.c_dataset()) };
        if gcp_count > 0 {
            return Err(Error::GcpGeoreferencing);
        }
        dataset.geo_transform().map_err(|_| Error::MissingGeoTransform)?;

        let dst_wkt = SpatialRef::from_epsg(3857)
            .and_then(|srs| srs.to_wkt())
            .map_err(|e| Error::RasterOpen(format!("EPSG:3857 definition: {}", e)))?;
        let dst_wkt = CString::new(dst_wkt)
            .map_err(|e| Error::RasterOpen(format!("EPSG:3857 definition: {}", e)))?;
        let handle = unsafe {
            gdal_sys::GDALAutoCreateWarpedVRT(
                dataset.c_dataset(),
                ptr::null(),
                dst_wkt.as_ptr(),
                gdal_sys::GDALResampleAlg::GRA_NearestNeighbour,
                0.0,
                ptr::null(),
            )
        };
        if handle.is_null() {
            return Err(Error::RasterOpen(format!(
                "could not warp {} to EPSG:3857",
                src.display()
            )));
        }
        let warped = unsafe { Dataset::from_c_dataset(handle) };
        let driver = DriverManager::get_driver_by_name("VRT")
            .map_err(|e| Error::RasterOpen(format!("VRT driver: {}", e)))?;
        let copy = warped
            .create_copy(&driver, vrt_path, &[])
            .map_err(|e| Error::RasterOpen(format!("{}: {}", vrt_path.display(), e)))?;
        // close before rewriting the file
        drop(copy);
        let vrt_xml = fs::read_to_string(vrt_path)?;
        fs::write(vrt_path, patch_nodata_options(&vrt_xml)?)?;
        info!("Warped VRT written to {}", vrt_path.display());
        Ok(WarpedVrt {
            path: vrt_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh raster handle on the warped VRT
    pub fn open(&self) -> Result<GdalRaster> {
        GdalRaster::open(&self.path)
    }
}

impl Drop for WarpedVrt {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            warn!("Could not remove {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VRT: &str = r#"<VRTDataset rasterXSize="512" rasterYSize="512" subClass="VRTWarpedDataset">
  <SRS>EPSG:3857</SRS>
  <VRTRasterBand dataType="Byte" band="1" subClass="VRTWarpedRasterBand" />
  <GDALWarpOptions>
    <WarpMemoryLimit>6.71089e+07</WarpMemoryLimit>
    <ResampleAlg>NearestNeighbour</ResampleAlg>
  </GDALWarpOptions>
</VRTDataset>"#;

    #[test]
    fn test_nodata_options_inserted() {
        let patched = patch_nodata_options(VRT).unwrap();
        // warp options first, ahead of the serialized ones
        assert!(patched
            .contains("<GDALWarpOptions><Option name=\"INIT_DEST\">NO_DATA</Option><Option name=\"UNIFIED_SRC_NODATA\">YES</Option>"));
        // nodata color as dataset metadata, directly under the root element
        assert!(patched
            .contains("subClass=\"VRTWarpedDataset\"><Metadata><MDI key=\"NODATA_VALUES\">0 0 0 0</MDI></Metadata>"));
        // serialized content preserved
        assert!(patched.contains("<ResampleAlg>NearestNeighbour</ResampleAlg>"));
        assert!(patched.contains("<SRS>EPSG:3857</SRS>"));
    }

    #[test]
    fn test_patch_rejects_foreign_xml() {
        match patch_nodata_options("<VRTDataset></VRTDataset>") {
            Err(Error::RasterOpen(msg)) => assert!(msg.contains("GDALWarpOptions")),
            _ => panic!("expected error for VRT without warp options"),
        }
    }
}

//! Built-in constraint table.
//!
//! Codes are the backend's access-constraint enumeration values.

use super::registry::ConstraintForm::{self, Boolean, MinMax, Structured};

/// `(name, code, form)` for every constraint creatable out of the box.
pub(crate) const BUILTIN: &[(&str, i32, ConstraintForm)] = &[
    // Basic geometry and time
    ("Altitude", 2, MinMax),
    ("AngularRate", 3, MinMax),
    ("ApparentTime", 4, MinMax),
    ("AzimuthAngle", 6, MinMax),
    ("AzimuthRate", 69, MinMax),
    ("CrdnAngle", 9, MinMax),
    ("CrdnVectorMag", 10, MinMax),
    ("Duration", 13, MinMax),
    ("ElevationAngle", 14, MinMax),
    ("ElevationRate", 70, MinMax),
    ("GMT", 16, MinMax),
    ("Intervals", 22, Structured),
    ("Lighting", 25, Structured),
    ("LineOfSight", 26, Boolean),
    ("LocalTime", 27, MinMax),
    ("Range", 34, MinMax),
    ("RangeRate", 35, MinMax),
    ("PropagationDelay", 33, MinMax),
    // Sun and moon
    ("LunarElevationAngle", 30, MinMax),
    ("SunElevationAngle", 58, MinMax),
    ("LOSLunarExclusion", 28, MinMax),
    ("LOSSunExclusion", 29, MinMax),
    ("LOSSunIlluminationAngle", 187, MinMax),
    // Obstruction and terrain
    ("ObjectExclusionAngle", 32, Structured),
    ("ThirdBodyObstruction", 61, Structured),
    ("TerrainMask", 67, Boolean),
    ("AzElMask", 68, Boolean),
    ("GeoExclusion", 71, MinMax),
    ("GroundSampleDistance", 72, MinMax),
    ("HeightAboveHorizon", 73, MinMax),
    ("TerrainGrazingAngle", 74, MinMax),
    ("CbObstruction", 91, Structured),
    // SAR
    ("SarAreaRate", 36, MinMax),
    ("SarAzRes", 37, MinMax),
    ("SarCNR", 38, MinMax),
    ("SarIntTime", 40, MinMax),
    ("SarPTCR", 41, MinMax),
    ("SarSCR", 42, MinMax),
    ("SarSigmaN", 43, MinMax),
    ("SarSNR", 44, MinMax),
    ("SarCNRJamming", 105, MinMax),
    ("SarJOverS", 106, MinMax),
    ("SarSCRJamming", 115, MinMax),
    ("SarSNRJamming", 116, MinMax),
    ("SarOrthoPolCNR", 107, MinMax),
    ("SarOrthoPolCNRJamming", 108, MinMax),
    ("SarOrthoPolJOverS", 109, MinMax),
    ("SarOrthoPolPTCR", 110, MinMax),
    ("SarOrthoPolSCR", 111, MinMax),
    ("SarOrthoPolSCRJamming", 112, MinMax),
    ("SarOrthoPolSNR", 113, MinMax),
    ("SarOrthoPolSNRJamming", 114, MinMax),
    // Search and track
    ("SrchTrkClearDoppler", 46, MinMax),
    ("SrchTrkDwellTime", 47, MinMax),
    ("SrchTrkIntegratedPDet", 48, MinMax),
    ("SrchTrkIntegratedPulses", 49, MinMax),
    ("SrchTrkIntegratedSNR", 50, MinMax),
    ("SrchTrkIntegrationTime", 51, MinMax),
    ("SrchTrkMLCFilter", 52, MinMax),
    ("SrchTrkSinglePulsePDet", 53, MinMax),
    ("SrchTrkSinglePulseSNR", 54, MinMax),
    ("SrchTrkSLCFilter", 55, MinMax),
    ("SrchTrkUnambigDoppler", 56, MinMax),
    ("SrchTrkUnambigRange", 57, MinMax),
    ("SrchTrkDwellTimeJamming", 117, MinMax),
    ("SrchTrkIntegratedJOverS", 118, MinMax),
    ("SrchTrkIntegratedPDetJamming", 119, MinMax),
    ("SrchTrkIntegratedPulsesJamming", 120, MinMax),
    ("SrchTrkIntegratedSNRJamming", 121, MinMax),
    ("SrchTrkIntegrationTimeJamming", 122, MinMax),
    ("SrchTrkSinglePulseJOverS", 139, MinMax),
    ("SrchTrkSinglePulsePDetJamming", 140, MinMax),
    ("SrchTrkSinglePulseSNRJamming", 141, MinMax),
    ("SrchTrkOrthoPolDwellTime", 123, MinMax),
    ("SrchTrkOrthoPolDwellTimeJamming", 124, MinMax),
    ("SrchTrkOrthoPolIntegratedJOverS", 125, MinMax),
    ("SrchTrkOrthoPolIntegratedPDet", 126, MinMax),
    ("SrchTrkOrthoPolIntegratedPDetJamming", 127, MinMax),
    ("SrchTrkOrthoPolIntegratedPulses", 128, MinMax),
    ("SrchTrkOrthoPolIntegratedPulsesJamming", 129, MinMax),
    ("SrchTrkOrthoPolIntegratedSNR", 130, MinMax),
    ("SrchTrkOrthoPolIntegratedSNRJamming", 131, MinMax),
    ("SrchTrkOrthoPolIntegrationTime", 132, MinMax),
    ("SrchTrkOrthoPolIntegrationTimeJamming", 133, MinMax),
    ("SrchTrkOrthoPolSinglePulseJOverS", 134, MinMax),
    ("SrchTrkOrthoPolSinglePulsePDet", 135, MinMax),
    ("SrchTrkOrthoPolSinglePulsePDetJamming", 136, MinMax),
    ("SrchTrkOrthoPolSinglePulseSNR", 137, MinMax),
    ("SrchTrkOrthoPolSinglePulseSNRJamming", 138, MinMax),
    // Plugins and conditions
    ("Matlab", 31, Structured),
    ("CrdnCondition", 104, Structured),
];

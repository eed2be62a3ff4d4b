//! The closed set of parameter type tags a node input/output can declare.

use serde::{Deserialize, Serialize};

/// A parameter's declared semantic type.
///
/// This enumeration is frozen by design (§6 of the runtime contract):
/// adding a tag means registering converters in `nebula-parameter` first,
/// and workflows that reference an unknown tag are rejected at validation
/// rather than silently passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
    Date,
    Json,
    Secret,
    Integration,
    Queue,
    Database,
    Dataset,
    Email,
    Blob,
    Image,
    Audio,
    Video,
    Document,
    Gltf,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    GeoJson,
    Any,
}

impl ParamType {
    /// Blob-family tags are interchangeable at the edge-type-compatibility
    /// check (§4.1) and all resolve to an object reference on the wire.
    #[must_use]
    pub fn is_blob_family(self) -> bool {
        matches!(
            self,
            Self::Blob | Self::Image | Self::Audio | Self::Video | Self::Document | Self::Gltf
        )
    }

    /// GeoJSON-family tags pass through the parameter mapper untouched.
    #[must_use]
    pub fn is_geojson_family(self) -> bool {
        matches!(
            self,
            Self::Point
                | Self::LineString
                | Self::Polygon
                | Self::MultiPoint
                | Self::MultiLineString
                | Self::MultiPolygon
                | Self::GeometryCollection
                | Self::GeoJson
        )
    }

    /// JSON-family tags (including GeoJSON) pass through unchanged and
    /// support string-encoded JSON on the way back in.
    #[must_use]
    pub fn is_json_family(self) -> bool {
        self == Self::Json || self.is_geojson_family()
    }

    /// Runtime-only kinds resolved by a service rather than stored as a
    /// plain value (§4.5 step 2).
    #[must_use]
    pub fn is_service_resolved(self) -> bool {
        matches!(
            self,
            Self::Secret | Self::Integration | Self::Queue | Self::Database | Self::Dataset
        )
    }

    /// Classify a blob's MIME type into the narrowest matching blob tag,
    /// used when resolving an `any`-typed object reference (§4.3).
    #[must_use]
    pub fn from_mime_type(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            Self::Image
        } else if mime_type.starts_with("audio/") {
            Self::Audio
        } else if mime_type.starts_with("video/") {
            Self::Video
        } else if mime_type == "model/gltf-binary" {
            Self::Gltf
        } else {
            Self::Document
        }
    }
}

/// Edge type-compatibility check (§4.1): `any` accepts everything, blob
/// tags are mutually interchangeable, everything else must match exactly.
#[must_use]
pub fn types_compatible(source: ParamType, target: ParamType) -> bool {
    if source == ParamType::Any || target == ParamType::Any {
        return true;
    }
    if source.is_blob_family() && target.is_blob_family() {
        return true;
    }
    source == target
}

/// The tessellators' result type.
pub type TessellationResult = Result<(), TessellationError>;

/// An error that can happen while generating geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryBuilderError {
    InvalidVertex,
    TooManyVertices,
}

impl core::fmt::Display for GeometryBuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GeometryBuilderError::InvalidVertex => {
                write!(f, "Invalid vertex")
            }
            GeometryBuilderError::TooManyVertices => {
                write!(f, "Too many vertices")
            }
        }
    }
}

impl std::error::Error for GeometryBuilderError {}

/// Geometry that cannot produce any triangles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DegenerateGeometry {
    /// The stroke width is zero, negative or not finite.
    InvalidStrokeWidth,
    /// A subpath reduces to a single point.
    EmptySubpath,
    /// No subpath has enough distinct points to enclose an area.
    NotEnoughPoints,
}

impl core::fmt::Display for DegenerateGeometry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DegenerateGeometry::InvalidStrokeWidth => {
                write!(f, "Invalid stroke width")
            }
            DegenerateGeometry::EmptySubpath => {
                write!(f, "Subpath reduces to a single point")
            }
            DegenerateGeometry::NotEnoughPoints => {
                write!(f, "Not enough points to enclose an area")
            }
        }
    }
}

impl std::error::Error for DegenerateGeometry {}

#[derive(Clone, Debug, PartialEq)]
pub enum UnsupportedParameter {
    PositionIsNaN,
    ToleranceIsNaN,
}

impl core::fmt::Display for UnsupportedParameter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UnsupportedParameter::PositionIsNaN => {
                write!(f, "Position is not a number")
            }
            UnsupportedParameter::ToleranceIsNaN => {
                write!(f, "Tolerance threshold is not a number")
            }
        }
    }
}

impl std::error::Error for UnsupportedParameter {}

/// The tessellators' error enumeration.
#[derive(Clone, Debug, PartialEq)]
pub enum TessellationError {
    UnsupportedParameter(UnsupportedParameter),
    GeometryBuilder(GeometryBuilderError),
    DegenerateGeometry(DegenerateGeometry),
}

impl core::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TessellationError::UnsupportedParameter(e) => {
                write!(f, "Unsupported parameter: {}", e)
            }
            TessellationError::GeometryBuilder(e) => {
                write!(f, "Geometry builder error: {}", e)
            }
            TessellationError::DegenerateGeometry(e) => {
                write!(f, "Degenerate geometry: {}", e)
            }
        }
    }
}

impl std::error::Error for TessellationError {}

impl core::convert::From<GeometryBuilderError> for TessellationError {
    fn from(value: GeometryBuilderError) -> Self {
        Self::GeometryBuilder(value)
    }
}

impl core::convert::From<DegenerateGeometry> for TessellationError {
    fn from(value: DegenerateGeometry) -> Self {
        Self::DegenerateGeometry(value)
    }
}

impl core::convert::From<UnsupportedParameter> for TessellationError {
    fn from(value: UnsupportedParameter) -> Self {
        Self::UnsupportedParameter(value)
    }
}

//! GL scalar types and enum constants
//!
//! The subset of OpenGL ES scalar type aliases and enum values spoken by the
//! shading-object API. Values match the GL specification.

// =============================================================================
// BASIC TYPES
// =============================================================================

/// GL boolean type
pub type GLboolean = u8;
/// GL int type
pub type GLint = i32;
/// GL unsigned int type
pub type GLuint = u32;
/// GL size type
pub type GLsizei = i32;
/// GL enum type
pub type GLenum = u32;

// =============================================================================
// BOOLEAN CONSTANTS
// =============================================================================

/// GL false value
pub const GL_FALSE: GLboolean = 0;
/// GL true value
pub const GL_TRUE: GLboolean = 1;

// =============================================================================
// ERROR CODES
// =============================================================================

/// No error has been recorded
pub const GL_NO_ERROR: GLenum = 0;
/// An unacceptable value for an enumerated argument
pub const GL_INVALID_ENUM: GLenum = 0x0500;
/// A numeric argument is out of range
pub const GL_INVALID_VALUE: GLenum = 0x0501;
/// The operation is not allowed in the current state
pub const GL_INVALID_OPERATION: GLenum = 0x0502;
/// Not enough memory to execute the command
pub const GL_OUT_OF_MEMORY: GLenum = 0x0505;

// =============================================================================
// SHADER TYPES
// =============================================================================

/// Fragment shader object type
pub const GL_FRAGMENT_SHADER: GLenum = 0x8B30;
/// Vertex shader object type
pub const GL_VERTEX_SHADER: GLenum = 0x8B31;

// =============================================================================
// SHADER OBJECT QUERIES
// =============================================================================

/// Shader type query
pub const GL_SHADER_TYPE: GLenum = 0x8B4F;
/// Deletion mark query
pub const GL_DELETE_STATUS: GLenum = 0x8B80;
/// Compile status query
pub const GL_COMPILE_STATUS: GLenum = 0x8B81;
/// Info log length query (includes the terminator)
pub const GL_INFO_LOG_LENGTH: GLenum = 0x8B84;
/// Source length query (includes the terminator)
pub const GL_SHADER_SOURCE_LENGTH: GLenum = 0x8B88;

// =============================================================================
// PRECISION FORMATS
// =============================================================================

/// Low precision float format
pub const GL_LOW_FLOAT: GLenum = 0x8DF0;
/// Medium precision float format
pub const GL_MEDIUM_FLOAT: GLenum = 0x8DF1;
/// High precision float format
pub const GL_HIGH_FLOAT: GLenum = 0x8DF2;
/// Low precision integer format
pub const GL_LOW_INT: GLenum = 0x8DF3;
/// Medium precision integer format
pub const GL_MEDIUM_INT: GLenum = 0x8DF4;
/// High precision integer format
pub const GL_HIGH_INT: GLenum = 0x8DF5;

// =============================================================================
// CAPABILITY QUERIES
// =============================================================================

/// Whether a shader compiler is present in this configuration
pub const GL_SHADER_COMPILER: GLenum = 0x8DFA;

// Copied out of the book because I want to follow all applicable standards...

#[derive(Debug, Clone)]
pub struct StructError {
    pub message: String,
}

impl std::fmt::Display for StructError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StructError {}

impl From<&str> for StructError {
    fn from(message: &str) -> StructError {
        StructError {
            message: String::from(message),
        }
    }
}

impl From<String> for StructError {
    fn from(message: String) -> StructError {
        StructError { message: message }
    }
}

impl From<std::io::Error> for StructError {
    fn from(err: std::io::Error) -> StructError {
        StructError {
            message: format!("{}", err),
        }
    }
}

impl From<serde_json::Error> for StructError {
    fn from(err: serde_json::Error) -> StructError {
        StructError {
            message: format!("{:?}", err),
        }
    }
}

impl From<tracing_subscriber::util::TryInitError> for StructError {
    fn from(err: tracing_subscriber::util::TryInitError) -> StructError {
        StructError {
            message: format!("could not set up logging: {}", err),
        }
    }
}

#[test]
fn io_error_keeps_its_message() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such thing");
    let err: StructError = io_err.into();
    assert_eq!(err.to_string(), "no such thing");
}

#[test]
fn string_errors() {
    let err: StructError = "root is not a directory".into();
    assert_eq!(err.message, "root is not a directory");
    let err: StructError = format!("{} files", 3).into();
    assert_eq!(format!("{}", err), "3 files");
}

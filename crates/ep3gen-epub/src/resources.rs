//! Static container files

/// Path of the container descriptor
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Container descriptor pointing at the package document
pub const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/package.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Path of the stylesheet inside the container
pub const STYLESHEET_PATH: &str = "OEBPS/Styles/stylesheet.css";

/// Directory of images inside the container
pub const IMAGES_DIR: &str = "OEBPS/Images";

/// Stylesheet used when no resource override is supplied
pub const DEFAULT_STYLESHEET: &str = r#"body {
  margin: 0 5%;
  font-family: serif;
  line-height: 1.4;
}

h1, h2, h3 {
  text-align: center;
  font-weight: normal;
  margin: 2em 0 1em;
}

p {
  margin: 0;
  text-indent: 1.5em;
  text-align: justify;
}

div.cover, div.titlepage {
  text-align: center;
  margin: 0;
  padding: 0;
}

div.cover img, div.titlepage img {
  max-width: 100%;
  max-height: 100%;
}

h1.title {
  margin-top: 30%;
}

h2.subtitle {
  font-style: italic;
}

p.series, p.author, p.publisher, p.published, p.copy {
  text-align: center;
  text-indent: 0;
}

p.author {
  margin-top: 2em;
}

p.publisher {
  margin-top: 4em;
}
"#;

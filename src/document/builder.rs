use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::api_document::{ApiDocument, RouteRegistration};
use crate::api_doc::{ApiDoc, DocError, RegistrationError};
use crate::config::DocConfig;
use crate::cors::CorsTable;
use crate::method::HttpMethod;
use crate::parameter::Parameter;
use crate::path::{check_parameters_in_path, tag_from_path, to_doc_path, to_route_path};
use crate::rules::compile_rules;
use crate::swagger::{self, Info, Swagger, PARAMETERS_PREFIX};

/// Accumulates registered operations into one document.
///
/// Registration is all-or-nothing: a failing registration leaves the builder
/// exactly as it was.
///
/// # Example
///
/// ```rust
/// use restdoc::api_doc::{ApiDocCommon, Response};
/// use restdoc::config::DocConfig;
/// use restdoc::document::DocumentBuilder;
/// use restdoc::parameter::Parameter;
/// use restdoc::value_info::{ValueInfo, ValueKind};
///
/// let mut builder = DocumentBuilder::new(DocConfig::default()).unwrap();
/// builder
///     .get(
///         "/books/:id",
///         ApiDocCommon::new()
///             .parameter("id", Parameter::in_path(ValueInfo::new(ValueKind::Int64)))
///             .response(200, Response::new("the book")),
///     )
///     .unwrap();
/// let document = builder.finish();
/// assert!(document.to_json().unwrap().contains("/books/{id}"));
/// ```
#[derive(Debug)]
pub struct DocumentBuilder {
    config: DocConfig,
    swagger: Swagger,
    globals: BTreeMap<String, Parameter>,
    /// Definition name to record identifier
    definition_ids: BTreeMap<String, String>,
    cors: Option<CorsTable>,
    routes: Vec<RouteRegistration>,
}

impl DocumentBuilder {
    /// Start a document from `config`.
    ///
    /// Fails when the CORS settings are inconsistent or a configured global
    /// parameter is invalid.
    pub fn new(config: DocConfig) -> Result<Self, DocError> {
        let info = Info {
            title: config.title.clone(),
            description: config.description.clone(),
            version: config.version.clone(),
        };
        let mut swagger = Swagger::new(info, config.base_path.clone(), config.scheme_names());
        swagger.host = config.domain_name.clone();

        let cors = if config.allow_origin {
            Some(CorsTable::new(&config.origins, config.allow_credentials)?)
        } else {
            None
        };

        let globals = config.global_parameters.clone();
        let mut builder = Self {
            config,
            swagger,
            globals: BTreeMap::new(),
            definition_ids: BTreeMap::new(),
            cors,
            routes: Vec::new(),
        };
        builder.set_global_parameters(globals)?;
        Ok(builder)
    }

    /// Replace the global parameter table.
    ///
    /// Each global must be carried in exactly one location. Operations
    /// registered afterwards may reference them by name.
    ///
    /// Fails without changing anything when the new table drops a name that
    /// an already registered operation references. Rules compiled for those
    /// operations keep the declaration they were registered with.
    pub fn set_global_parameters(
        &mut self,
        globals: BTreeMap<String, Parameter>,
    ) -> Result<(), DocError> {
        for (path, item) in &self.swagger.paths {
            for method in item.methods() {
                let references = item
                    .operation(method)
                    .into_iter()
                    .flat_map(|op| &op.parameters)
                    .filter_map(|p| p.reference.as_deref())
                    .filter_map(|r| r.strip_prefix(PARAMETERS_PREFIX));
                for name in references {
                    if !globals.contains_key(name) {
                        return Err(DocError::GlobalParameterInUse {
                            name: name.to_string(),
                            method,
                            path: path.clone(),
                        });
                    }
                }
            }
        }

        let mut rendered = BTreeMap::new();
        for (name, parameter) in &globals {
            let mut slots = parameter
                .to_swagger_parameters(name)
                .map_err(|source| DocError::Parameter {
                    name: name.clone(),
                    source,
                })?;
            if slots.len() != 1 {
                return Err(DocError::InvalidGlobalParameter { name: name.clone() });
            }
            if let Some(slot) = slots.pop() {
                rendered.insert(name.clone(), slot);
            }
        }
        for (name, parameter) in &rendered {
            info!(
                name = %name,
                location = ?parameter.location,
                "global parameter registered"
            );
        }
        self.swagger.parameters = rendered;
        self.globals = globals;
        Ok(())
    }

    /// Register `doc` as the operation `method path`.
    ///
    /// `path` may use either `:name` or `{name}` placeholders.
    pub fn register<D: ApiDoc>(
        &mut self,
        method: HttpMethod,
        path: &str,
        mut doc: D,
    ) -> Result<&RouteRegistration, RegistrationError> {
        doc.set_method(method);
        let index = self
            .register_doc(method, path, &doc)
            .map_err(|source| RegistrationError {
                method,
                path: path.to_string(),
                source,
            })?;
        let route = &self.routes[index];
        info!(
            method = %method,
            path = %route.doc_path,
            rules = route.rules.len(),
            "operation registered"
        );
        Ok(route)
    }

    fn register_doc<D: ApiDoc>(
        &mut self,
        method: HttpMethod,
        path: &str,
        doc: &D,
    ) -> Result<usize, DocError> {
        let doc_path = to_doc_path(path)?;
        let route_path = to_route_path(path)?;

        let duplicate = self
            .swagger
            .paths
            .get(&doc_path)
            .and_then(|item| item.operation(method))
            .is_some();
        if duplicate {
            return Err(DocError::DuplicateOperation {
                method,
                path: doc_path,
            });
        }

        let mut operation = doc.to_swagger_operation()?;
        if operation.tags.is_empty() {
            let tag = tag_from_path(&doc_path);
            if !tag.is_empty() {
                operation.tags.push(tag);
            }
        }

        let (resolved, referenced) = self.resolve_references(&operation.parameters)?;
        check_parameters_in_path(&doc_path, &resolved)?;

        let definitions = doc.to_swagger_definitions()?;
        for (name, definition) in &definitions {
            if let Some(first) = self.definition_ids.get(name) {
                if *first != definition.identifier {
                    return Err(DocError::DefinitionConflict {
                        name: name.clone(),
                        first: first.clone(),
                        second: definition.identifier.clone(),
                    });
                }
            }
        }

        let mut rules = compile_rules(doc.parameters())?;
        rules.extend_from(&referenced)?;

        for (name, definition) in definitions {
            debug!(name = %name, identifier = %definition.identifier, "definition merged");
            self.definition_ids
                .insert(name.clone(), definition.identifier);
            self.swagger.definitions.insert(name, definition.schema);
        }
        if let Some(cors) = self.cors.as_mut() {
            let headers = doc
                .parameters()
                .iter()
                .chain(referenced.iter())
                .filter(|(_, parameter)| parameter.in_header.is_some())
                .map(|(name, _)| name.as_str());
            cors.register(&route_path, method, headers);
        }
        *self
            .swagger
            .paths
            .entry(doc_path.clone())
            .or_default()
            .slot_mut(method) = Some(operation);
        self.routes.push(RouteRegistration {
            method,
            route_path,
            doc_path,
            rules: Arc::new(rules),
        });
        Ok(self.routes.len() - 1)
    }

    /// Resolve `$ref` entries against the global table.
    ///
    /// Returns the parameters with references replaced by their targets, and
    /// the referenced global declarations by name.
    fn resolve_references(
        &self,
        parameters: &[swagger::Parameter],
    ) -> Result<(Vec<swagger::Parameter>, BTreeMap<String, Parameter>), DocError> {
        let mut resolved = Vec::with_capacity(parameters.len());
        let mut referenced = BTreeMap::new();
        for parameter in parameters {
            let Some(reference) = &parameter.reference else {
                resolved.push(parameter.clone());
                continue;
            };
            let not_found = || DocError::RefNotFound {
                reference: reference.clone(),
            };
            let name = reference.strip_prefix(PARAMETERS_PREFIX).ok_or_else(not_found)?;
            let target = self.swagger.parameters.get(name).ok_or_else(not_found)?;
            let declared = self.globals.get(name).ok_or_else(not_found)?;
            resolved.push(target.clone());
            referenced.insert(name.to_string(), declared.clone());
        }
        Ok((resolved, referenced))
    }

    pub fn get<D: ApiDoc>(
        &mut self,
        path: &str,
        doc: D,
    ) -> Result<&RouteRegistration, RegistrationError> {
        self.register(HttpMethod::Get, path, doc)
    }

    pub fn post<D: ApiDoc>(
        &mut self,
        path: &str,
        doc: D,
    ) -> Result<&RouteRegistration, RegistrationError> {
        self.register(HttpMethod::Post, path, doc)
    }

    pub fn put<D: ApiDoc>(
        &mut self,
        path: &str,
        doc: D,
    ) -> Result<&RouteRegistration, RegistrationError> {
        self.register(HttpMethod::Put, path, doc)
    }

    pub fn patch<D: ApiDoc>(
        &mut self,
        path: &str,
        doc: D,
    ) -> Result<&RouteRegistration, RegistrationError> {
        self.register(HttpMethod::Patch, path, doc)
    }

    pub fn delete<D: ApiDoc>(
        &mut self,
        path: &str,
        doc: D,
    ) -> Result<&RouteRegistration, RegistrationError> {
        self.register(HttpMethod::Delete, path, doc)
    }

    pub fn head<D: ApiDoc>(
        &mut self,
        path: &str,
        doc: D,
    ) -> Result<&RouteRegistration, RegistrationError> {
        self.register(HttpMethod::Head, path, doc)
    }

    pub fn options<D: ApiDoc>(
        &mut self,
        path: &str,
        doc: D,
    ) -> Result<&RouteRegistration, RegistrationError> {
        self.register(HttpMethod::Options, path, doc)
    }

    /// The document as assembled so far.
    #[must_use]
    pub fn swagger(&self) -> &Swagger {
        &self.swagger
    }

    /// Freeze the builder into an immutable document.
    #[must_use]
    pub fn finish(self) -> ApiDocument {
        debug!(
            paths = self.swagger.paths.len(),
            definitions = self.swagger.definitions.len(),
            routes = self.routes.len(),
            "document finished"
        );
        ApiDocument::new(self.swagger, self.config, self.routes, self.cors)
    }
}

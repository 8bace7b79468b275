use serde_json::{json, Value};

#[must_use]
pub fn openapi_v1_spec() -> Value {
    let error_codes = crate::errors::API_ERROR_CODES;
    json!({
      "openapi": "3.0.3",
      "info": {
        "title": "glentrail API",
        "version": "v1"
      },
      "paths": {
        "/healthz": {
          "get": {
            "responses": {"200": {"description": "ok"}}
          }
        },
        "/readyz": {
          "get": {
            "responses": {
              "200": {"description": "ready"},
              "503": {"description": "store unavailable", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/openapi.json": {
          "get": {
            "responses": {"200": {"description": "generated OpenAPI v1 spec"}}
          }
        },
        "/v1/version": {
          "get": {
            "responses": {"200": {"description": "service and schema version metadata"}}
          }
        },
        "/v1/walks": {
          "get": {
            "parameters": [
              {"name": "search", "in": "query", "schema": {"type": "string", "maxLength": 200}},
              {"name": "difficulty", "in": "query", "schema": {"type": "string", "description": "comma-separated: easy, moderate, hard, strenuous"}},
              {"name": "region", "in": "query", "schema": {"type": "string", "description": "comma-separated region slugs"}},
              {"name": "min_distance", "in": "query", "schema": {"type": "number", "minimum": 0}},
              {"name": "max_distance", "in": "query", "schema": {"type": "number", "minimum": 0}},
              {"name": "min_duration", "in": "query", "schema": {"type": "number", "minimum": 0}},
              {"name": "max_duration", "in": "query", "schema": {"type": "number", "minimum": 0}},
              {"name": "tag", "in": "query", "schema": {"type": "string", "description": "comma-separated tags, all required"}},
              {"name": "sort", "in": "query", "schema": {"type": "string", "enum": ["popularity", "rating", "distance", "difficulty", "name", "recent"]}},
              {"name": "limit", "in": "query", "schema": {"type": "integer", "minimum": 1, "maximum": 200}},
              {"name": "offset", "in": "query", "schema": {"type": "integer", "minimum": 0}}
            ],
            "responses": {
              "200": {
                "description": "walk page",
                "content": {
                  "application/json": {
                    "examples": {
                      "ok": {
                        "value": {
                          "api_version": "v1",
                          "data": {
                            "items": [{"id": 1, "title": "Ben Nevis via the Mountain Track", "slug": "ben-nevis-mountain-track"}],
                            "total": 1, "limit": 50, "offset": 0
                          }
                        }
                      }
                    }
                  }
                }
              },
              "304": {"description": "not modified"},
              "400": {"description": "invalid query", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          },
          "post": {
            "responses": {
              "200": {"description": "created draft walk"},
              "400": {"description": "invalid body", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "404": {"description": "region missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "409": {"description": "slug already taken", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/walks/count": {
          "get": {
            "responses": {
              "200": {"description": "count of walks matching the same filters as /v1/walks"},
              "400": {"description": "invalid query", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/walks/{slug}": {
          "get": {
            "parameters": [
              {"name": "slug", "in": "path", "required": true, "schema": {"type": "string"}}
            ],
            "responses": {
              "200": {"description": "walk detail with region, author and stages"},
              "404": {"description": "walk missing or unpublished", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/walks/{slug}/stages": {
          "get": {
            "parameters": [
              {"name": "slug", "in": "path", "required": true, "schema": {"type": "string"}}
            ],
            "responses": {
              "200": {"description": "ordered stages"},
              "404": {"description": "walk missing or unpublished", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/walks/{slug}/reports": {
          "get": {
            "parameters": [
              {"name": "slug", "in": "path", "required": true, "schema": {"type": "string"}},
              {"name": "limit", "in": "query", "schema": {"type": "integer", "minimum": 1, "maximum": 100}}
            ],
            "responses": {
              "200": {"description": "published reports, newest first"},
              "404": {"description": "walk missing or unpublished", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/walks/{id}/publish": {
          "post": {
            "parameters": [
              {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}
            ],
            "responses": {
              "200": {"description": "published walk; repeat calls are no-ops"},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "404": {"description": "walk missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/walks/{id}/view": {
          "post": {
            "parameters": [
              {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}
            ],
            "responses": {
              "200": {"description": "view recorded; view_count is null when the walk no longer exists"}
            }
          }
        },
        "/v1/regions": {
          "get": {
            "responses": {"200": {"description": "regions with popularity, most popular first"}}
          },
          "post": {
            "responses": {
              "200": {"description": "created region"},
              "400": {"description": "invalid body", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "409": {"description": "slug already taken", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/regions/{slug}": {
          "get": {
            "parameters": [
              {"name": "slug", "in": "path", "required": true, "schema": {"type": "string"}}
            ],
            "responses": {
              "200": {"description": "region detail"},
              "404": {"description": "region missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/regions/{slug}/walks": {
          "get": {
            "parameters": [
              {"name": "slug", "in": "path", "required": true, "schema": {"type": "string"}},
              {"name": "limit", "in": "query", "schema": {"type": "integer", "minimum": 1, "maximum": 100}}
            ],
            "responses": {
              "200": {"description": "published walks in the region, newest first"},
              "404": {"description": "region missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/reports": {
          "post": {
            "responses": {
              "200": {"description": "created draft report"},
              "400": {"description": "invalid body", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "404": {"description": "walk missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/reports/{id}/publish": {
          "post": {
            "parameters": [
              {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}
            ],
            "responses": {
              "200": {"description": "published report; walk aggregates recomputed"},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "403": {"description": "not the report author", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "404": {"description": "report missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/reports/recent": {
          "get": {
            "parameters": [
              {"name": "region", "in": "query", "schema": {"type": "string", "description": "region slug"}},
              {"name": "limit", "in": "query", "schema": {"type": "integer", "minimum": 1, "maximum": 100}}
            ],
            "responses": {
              "200": {"description": "community feed, newest first"},
              "404": {"description": "region missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/completions": {
          "post": {
            "responses": {
              "200": {"description": "logged completion with refreshed stats and any newly earned badges"},
              "400": {"description": "invalid body", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "404": {"description": "walk missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "409": {"description": "walk already logged for that day", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/likes": {
          "get": {
            "parameters": [
              {"name": "target_type", "in": "query", "required": true, "schema": {"type": "string", "enum": ["walk", "report"]}},
              {"name": "target_id", "in": "query", "required": true, "schema": {"type": "integer", "minimum": 1}}
            ],
            "responses": {
              "200": {"description": "likes for the target, newest first"},
              "400": {"description": "invalid target", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "404": {"description": "target missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/likes/toggle": {
          "post": {
            "responses": {
              "200": {"description": "new like state and counter"},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "404": {"description": "target missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/me": {
          "get": {
            "responses": {
              "200": {"description": "acting user profile"},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/me/stats": {
          "get": {
            "responses": {
              "200": {"description": "lifetime stats; all zero until the first completion"},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/me/achievements": {
          "get": {
            "responses": {
              "200": {"description": "earned badges plus per-achievement progress"},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/me/activity": {
          "get": {
            "parameters": [
              {"name": "range", "in": "query", "schema": {"type": "string", "enum": ["week", "month", "3months", "6months", "year"]}}
            ],
            "responses": {
              "200": {"description": "time-bucketed activity series"},
              "400": {"description": "invalid range", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/me/history": {
          "get": {
            "parameters": [
              {"name": "limit", "in": "query", "schema": {"type": "integer", "minimum": 1, "maximum": 100}},
              {"name": "offset", "in": "query", "schema": {"type": "integer", "minimum": 0}}
            ],
            "responses": {
              "200": {"description": "own published reports, most recent outing first"},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/me/likes/{target_type}/{target_id}": {
          "get": {
            "parameters": [
              {"name": "target_type", "in": "path", "required": true, "schema": {"type": "string", "enum": ["walk", "report"]}},
              {"name": "target_id", "in": "path", "required": true, "schema": {"type": "integer", "minimum": 1}}
            ],
            "responses": {
              "200": {"description": "whether the acting user likes the target"},
              "401": {"description": "authentication required", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        }
      },
      "components": {
        "schemas": {
          "ApiErrorCode": {
            "type": "string",
            "enum": error_codes
          },
          "ApiError": {
            "type": "object",
            "required": ["code", "message", "details", "request_id"],
            "additionalProperties": false,
            "properties": {
              "code": {"$ref": "#/components/schemas/ApiErrorCode"},
              "message": {"type": "string"},
              "details": {"type": "object", "additionalProperties": true},
              "request_id": {"type": "string"}
            },
            "examples": {
              "invalidParam": {
                "value": {
                  "code": "invalid_param",
                  "message": "invalid query parameter: difficulty",
                  "details": {"parameter": "difficulty", "value": "vertical"},
                  "request_id": "req-0000000000000001"
                }
              },
              "conflict": {
                "value": {
                  "code": "conflict",
                  "message": "walk 'ben-nevis-mountain-track' already logged for 2026-08-23",
                  "details": {},
                  "request_id": "req-0000000000000002"
                }
              }
            }
          }
        }
      }
    })
}

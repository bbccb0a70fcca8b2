//! End-to-end tests driving the HTTP API over real JSON files
//!
//! Each test gets a fresh temporary data directory via `tempfile::TempDir`
//! and a server built with `ServerBuilder::from_config`, so requests go
//! through the same routes, layers and file stores as the binary.

use axum_test::TestServer;
use listings::prelude::*;
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Fixtures
// =============================================================================

/// Listings as the mobile client stores them: upper-case labels, integers,
/// numbers as text and keys the server does not know about.
fn listings() -> Value {
    json!([
        {
            "id": 1,
            "nome": "Casa no Centro",
            "finalidade": ["ALUGAR", "VENDA"],
            "tipo": "Casa",
            "status": "publicado",
            "imagem": "casa1.jpg",
            "descricao": "Casa ampla com quintal",
            "destaque": true,
            "valor_aluguel": 2500,
            "valor_venda": 450000.0,
            "bairro": "Centro",
            "area_terreno": 300.0,
            "area_construida": 180.0
        },
        {
            "id": 2,
            "nome": "Terreno Jardim",
            "finalidade": ["COMPRAR"],
            "tipo": "Terreno",
            "status": "publicado",
            "imagem": "terreno.jpg",
            "descricao": "Terreno plano",
            "valor_aluguel": 0,
            "valor_venda": "120000",
            "bairro": "Jardim",
            "area_terreno": 500.0,
            "area_construida": 0.0
        },
        {
            "id": 3,
            "nome": "Casa de praia",
            "finalidade": ["LOCACAO"],
            "tipo": "Casa de praia",
            "status": "RASCUNHO",
            "imagem": "praia.jpg",
            "descricao": "Perto do mar",
            "valor_aluguel": 4000.0,
            "valor_venda": 800000.0,
            "bairro": "Orla",
            "area_terreno": 250.0,
            "area_construida": 200.0
        },
        {
            "id": 4,
            "nome": "Sala comercial",
            "finalidade": null,
            "tipo": "Sala",
            "status": "publicado",
            "imagem": "sala.jpg",
            "descricao": "Sala no centro",
            "valor_aluguel": 1500.0,
            "valor_venda": 200000.0,
            "bairro": "centro",
            "area_terreno": 40.0,
            "area_construida": 40.0
        },
        {
            "id": 5,
            "nome": "Casa Jardim",
            "finalidade": ["alugar", "permuta", "LEILAO"],
            "tipo": "casa",
            "status": "publicado",
            "imagem": "casa5.jpg",
            "descricao": "Casa com piscina",
            "valor_aluguel": 3000.0,
            "valor_venda": 600000.0,
            "bairro": "Jardim",
            "area_terreno": 300.0,
            "area_construida": 220.0
        }
    ])
}

struct TestEnv {
    server: TestServer,
    dir: TempDir,
}

impl TestEnv {
    fn path(&self, file: &str) -> PathBuf {
        self.dir.path().join(file)
    }

    fn read(&self, file: &str) -> Value {
        let content = std::fs::read_to_string(self.path(file)).expect("Failed to read file");
        serde_json::from_str(&content).expect("File is not valid JSON")
    }

    fn write(&self, file: &str, value: &Value) {
        std::fs::write(self.path(file), serde_json::to_vec(value).unwrap())
            .expect("Failed to write file");
    }
}

fn start(dir: TempDir, default_limit: usize) -> TestEnv {
    let config = ServerConfig {
        data_dir: dir.path().to_path_buf(),
        default_limit,
        ..ServerConfig::default()
    };

    let app = ServerBuilder::from_config(&config)
        .build()
        .expect("Failed to build app");
    let server = TestServer::try_new(app).expect("Failed to create test server");

    TestEnv { server, dir }
}

fn create_test_env() -> TestEnv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join("imoveis.json"),
        serde_json::to_vec_pretty(&listings()).unwrap(),
    )
    .unwrap();
    start(dir, DEFAULT_LIMIT)
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|item| item["id"].as_i64().expect("Expected an integer id"))
        .collect()
}

// =============================================================================
// Listing Tests
// =============================================================================

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_itens_returns_file_contents_unchanged() {
        let env = create_test_env();

        let response = env.server.get("/itens").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body, listings());
    }

    #[tokio::test]
    async fn test_imoveis_without_filters_returns_everything() {
        let env = create_test_env();

        let body: Value = env.server.get("/imoveis").await.json();
        assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_tipo_is_exact_and_case_insensitive() {
        let env = create_test_env();

        let body: Value = env.server.get("/imoveis?tipo=CASA").await.json();
        assert_eq!(ids(&body), vec![1, 5]);
    }

    #[tokio::test]
    async fn test_bairro_is_case_insensitive() {
        let env = create_test_env();

        let body: Value = env.server.get("/imoveis?bairro=CENTRO").await.json();
        assert_eq!(ids(&body), vec![1, 4]);
    }

    #[tokio::test]
    async fn test_finalidade_matches_any_purpose() {
        let env = create_test_env();

        let body: Value = env.server.get("/imoveis?finalidade=Alugar").await.json();
        assert_eq!(ids(&body), vec![1, 3, 5]);

        let body: Value = env.server.get("/imoveis?finalidade=permuta").await.json();
        assert_eq!(ids(&body), vec![5]);
    }

    #[tokio::test]
    async fn test_finalidade_locacao_is_rent() {
        let env = create_test_env();

        let body: Value = env.server.get("/imoveis?finalidade=locacao").await.json();
        assert_eq!(ids(&body), vec![1, 3, 5]);

        let body: Value = env.server.get("/imoveis?finalidade=venda").await.json();
        assert_eq!(ids(&body), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_imoveis_returns_stored_objects() {
        let env = create_test_env();

        let body: Value = env.server.get("/imoveis?tipo=terreno").await.json();
        assert_eq!(body, Value::Array(vec![listings()[1].clone()]));
    }

    #[tokio::test]
    async fn test_unknown_labels_do_not_break_the_collection() {
        let env = create_test_env();
        env.write(
            "imoveis.json",
            &json!([{
                "id": 1,
                "nome": "Chácara",
                "finalidade": ["ARRENDAMENTO"],
                "tipo": "Chácara",
                "status": "vendido",
                "imagem": "",
                "descricao": "",
                "valor_aluguel": 0,
                "valor_venda": 0,
                "bairro": "Zona Rural",
                "area_terreno": 20000,
                "area_construida": 90
            }]),
        );

        let response = env.server.get("/itens").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body[0]["finalidade"], json!(["ARRENDAMENTO"]));

        let body: Value = env.server.get("/imoveis?finalidade=alugar").await.json();
        assert!(ids(&body).is_empty());
    }

    #[tokio::test]
    async fn test_area_bounds_are_inclusive() {
        let env = create_test_env();

        let body: Value = env
            .server
            .get("/imoveis?area_t_min=300&area_t_max=300")
            .await
            .json();
        assert_eq!(ids(&body), vec![1, 5]);

        let body: Value = env.server.get("/imoveis?area_c_min=200").await.json();
        assert_eq!(ids(&body), vec![3, 5]);
    }

    #[tokio::test]
    async fn test_price_ranges() {
        let env = create_test_env();

        let body: Value = env
            .server
            .get("/imoveis?preco_v_min=200000&preco_v_max=600000")
            .await
            .json();
        assert_eq!(ids(&body), vec![1, 4, 5]);

        let body: Value = env.server.get("/imoveis?preco_l_max=2500").await.json();
        assert_eq!(ids(&body), vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let env = create_test_env();

        let body: Value = env
            .server
            .get("/imoveis?tipo=casa&bairro=jardim&finalidade=alugar")
            .await
            .json();
        assert_eq!(ids(&body), vec![5]);
    }

    #[tokio::test]
    async fn test_filters_only_narrow_the_result() {
        let env = create_test_env();
        let all = ids(&env.server.get("/imoveis").await.json());

        let filters = [
            "finalidade=comprar",
            "tipo=sala",
            "bairro=jardim",
            "area_t_min=250",
            "area_t_max=300",
            "area_c_max=100",
            "preco_v_min=150000",
            "preco_v_max=500000",
            "preco_l_min=1500",
            "preco_l_max=3000",
        ];

        for filter in filters {
            let single = ids(&env.server.get(&format!("/imoveis?{}", filter)).await.json());
            assert!(single.iter().all(|id| all.contains(id)), "{}", filter);

            for other in filters {
                let both = ids(
                    &env.server
                        .get(&format!("/imoveis?{}&{}", filter, other))
                        .await
                        .json(),
                );
                assert!(both.len() <= single.len(), "{} & {}", filter, other);
                assert!(both.iter().all(|id| single.contains(id)));
            }
        }
    }

    #[tokio::test]
    async fn test_blank_parameters_are_ignored() {
        let env = create_test_env();

        let body: Value = env
            .server
            .get("/imoveis?finalidade=&tipo=&bairro=&area_t_min=")
            .await
            .json();
        assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_pagination_applies_after_filtering() {
        let env = create_test_env();

        let body: Value = env
            .server
            .get("/imoveis?finalidade=alugar&skip=1&limit=1")
            .await
            .json();
        assert_eq!(ids(&body), vec![3]);

        let body: Value = env.server.get("/imoveis?offset=3").await.json();
        assert_eq!(ids(&body), vec![4, 5]);

        let body: Value = env.server.get("/imoveis?skip=10").await.json();
        assert!(ids(&body).is_empty());

        let body: Value = env.server.get("/imoveis?limit=0").await.json();
        assert!(ids(&body).is_empty());
    }

    #[tokio::test]
    async fn test_configured_default_limit() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("imoveis.json"),
            serde_json::to_vec(&listings()).unwrap(),
        )
        .unwrap();
        let env = start(dir, 2);

        let body: Value = env.server.get("/imoveis").await.json();
        assert_eq!(ids(&body), vec![1, 2]);

        // `/itens` is not paginated
        let body: Value = env.server.get("/itens").await.json();
        assert_eq!(ids(&body).len(), 5);
    }

    #[tokio::test]
    async fn test_bad_number_is_rejected() {
        let env = create_test_env();

        let response = env.server.get("/imoveis?area_t_min=grande").await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["parameter"], "area_t_min");
        assert_eq!(body["details"]["value"], "grande");
    }

    #[tokio::test]
    async fn test_negative_limit_is_rejected() {
        let env = create_test_env();

        let response = env.server.get("/imoveis?limit=-1").await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_listings_read_numbers_stored_as_text() {
        let env = create_test_env();
        env.write(
            "imoveis.json",
            &json!([{
                "id": 9,
                "nome": "Apartamento",
                "finalidade": "ALUGUEL",
                "tipo": "Apartamento",
                "status": "published",
                "imagem": "",
                "descricao": "",
                "valor_aluguel": "1800",
                "valor_venda": "0",
                "bairro": "Centro",
                "area_terreno": "0",
                "area_construida": "75.5"
            }]),
        );

        let body: Value = env.server.get("/imoveis?finalidade=alugar").await.json();
        assert_eq!(ids(&body), vec![9]);
        assert_eq!(body[0]["finalidade"], "ALUGUEL");
        assert_eq!(body[0]["status"], "published");
        assert_eq!(body[0]["area_construida"], "75.5");

        let body: Value = env.server.get("/imoveis?area_c_min=75.5").await.json();
        assert_eq!(ids(&body), vec![9]);
    }

    #[tokio::test]
    async fn test_missing_listings_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let env = start(dir, DEFAULT_LIMIT);

        let response = env.server.get("/imoveis").await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["code"], "COLLECTION_NOT_FOUND");

        env.server.get("/itens").await.assert_status_not_found();
        assert!(!env.path("imoveis.json").exists());
    }

    #[tokio::test]
    async fn test_corrupt_listings_file_is_server_error() {
        let env = create_test_env();
        std::fs::write(env.path("imoveis.json"), "[{\"id\": 1,").unwrap();

        let response = env.server.get("/itens").await;
        assert!(response.status_code().is_server_error());

        let body: Value = response.json();
        assert_eq!(body["code"], "STORAGE_CORRUPT");
    }
}

// =============================================================================
// User Tests
// =============================================================================

mod user_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_user_assigns_sequential_ids() {
        let env = create_test_env();

        let response = env
            .server
            .post("/usuarios")
            .json(&json!({"nome": "Ana", "idade": 30}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["mensagem"], "Usuário criado com sucesso!");
        assert_eq!(body["id"], 1);

        let body: Value = env
            .server
            .post("/usuarios")
            .json(&json!({"nome": "Bruno", "idade": 41}))
            .await
            .json();
        assert_eq!(body["id"], 2);

        assert_eq!(
            env.read("usuarios.json"),
            json!([
                {"id": 1, "nome": "Ana", "idade": 30},
                {"id": 2, "nome": "Bruno", "idade": 41}
            ])
        );
    }

    #[tokio::test]
    async fn test_create_user_continues_after_existing_users() {
        let env = create_test_env();
        env.write(
            "usuarios.json",
            &json!([
                {"id": 1, "nome": "Ana", "idade": 30},
                {"id": 2, "nome": "Bruno", "idade": 41},
                {"id": 3, "nome": "Carla", "idade": 25}
            ]),
        );

        let body: Value = env
            .server
            .post("/usuarios")
            .json(&json!({"nome": "Davi", "idade": 19}))
            .await
            .json();
        assert_eq!(body["id"], 4);
        assert_eq!(env.read("usuarios.json").as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_user_does_not_touch_listings() {
        let env = create_test_env();

        env.server
            .post("/usuarios")
            .json(&json!({"nome": "Ana", "idade": 30}))
            .await
            .assert_status_ok();

        assert_eq!(env.read("imoveis.json"), listings());
    }

    #[tokio::test]
    async fn test_create_user_reports_invalid_fields() {
        let env = create_test_env();

        let response = env
            .server
            .post("/usuarios")
            .json(&json!({"nome": "  ", "idade": -3}))
            .await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["details"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["nome", "idade"]);

        assert!(!env.path("usuarios.json").exists());
    }

    #[tokio::test]
    async fn test_create_user_requires_fields() {
        let env = create_test_env();

        let response = env.server.post("/usuarios").json(&json!({})).await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let env = create_test_env();

        let response = env.server.post("/usuarios").text("{\"nome\": ").await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

// =============================================================================
// Favorite Tests
// =============================================================================

mod favorite_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_favorites_creates_missing_file() {
        let env = create_test_env();
        assert!(!env.path("favoritos.json").exists());

        let response = env.server.get("/favoritos").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body, json!([]));
        assert_eq!(env.read("favoritos.json"), json!([]));
    }

    #[tokio::test]
    async fn test_add_favorite_keeps_payload() {
        let env = create_test_env();
        let favorite = json!({"id": 1, "nome": "Casa no Centro", "bairro": "Centro"});

        let response = env.server.post("/favoritos").json(&favorite).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["message"], "Imóvel adicionado aos favoritos!");

        let body: Value = env.server.get("/favoritos").await.json();
        assert_eq!(body, json!([favorite]));
    }

    #[tokio::test]
    async fn test_add_favorite_is_idempotent() {
        let env = create_test_env();

        for name in ["primeiro", "segundo"] {
            let response = env
                .server
                .post("/favoritos")
                .json(&json!({"id": 7, "nome": name}))
                .await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["message"], "Imóvel adicionado aos favoritos!");
        }

        // The first payload is kept
        assert_eq!(
            env.read("favoritos.json"),
            json!([{"id": 7, "nome": "primeiro"}])
        );
    }

    #[tokio::test]
    async fn test_add_favorite_requires_integer_id() {
        let env = create_test_env();

        env.server
            .post("/favoritos")
            .json(&json!({"nome": "sem id"}))
            .await
            .assert_status_bad_request();

        env.server
            .post("/favoritos")
            .json(&json!({"id": "7"}))
            .await
            .assert_status_bad_request();

        env.server
            .post("/favoritos")
            .json(&json!([1, 2]))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_delete_favorite() {
        let env = create_test_env();
        env.write("favoritos.json", &json!([{"id": 1}, {"id": 2}, {"id": 3}]));

        let response = env.server.delete("/favoritos/2").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["message"], "Imóvel removido dos favoritos!");

        let body: Value = env.server.get("/favoritos").await.json();
        assert_eq!(ids(&body), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_delete_missing_favorite_leaves_file_unchanged() {
        let env = create_test_env();
        let original = "[\n  {\"id\": 1, \"nome\": \"Casa\"}\n]\n";
        std::fs::write(env.path("favoritos.json"), original).unwrap();

        let response = env.server.delete("/favoritos/99").await;
        response.assert_status_not_found();

        let body: Value = response.json();
        assert_eq!(body["code"], "RECORD_NOT_FOUND");
        assert_eq!(body["details"]["id"], 99);

        let after = std::fs::read_to_string(env.path("favoritos.json")).unwrap();
        assert_eq!(after, original);
    }

    #[tokio::test]
    async fn test_delete_favorite_with_non_integer_id() {
        let env = create_test_env();

        env.server
            .delete("/favoritos/abc")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_add_then_delete_round_trip() {
        let env = create_test_env();

        env.server
            .post("/favoritos")
            .json(&json!({"id": 5, "tipo": "casa"}))
            .await
            .assert_status_ok();
        env.server.delete("/favoritos/5").await.assert_status_ok();
        env.server
            .delete("/favoritos/5")
            .await
            .assert_status_not_found();

        assert_eq!(env.read("favoritos.json"), json!([]));
    }
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let env = create_test_env();

        let response = env.server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}

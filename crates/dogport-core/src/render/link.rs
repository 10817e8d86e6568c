use crate::hcl::Expr;
use crate::model::{EntityId, Link};
use crate::resolve::AddressBook;
use crate::table::Table;

use super::{Attrs, Render, attr};

impl Render for Link {
    const TABLE: Table = Table::Link;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self, _refs: &AddressBook) -> Attrs {
        let c = &self.connection;
        let ssl = &c.ssl_options;

        let ssl_options = Expr::Object(vec![
            attr("cacertfile", Expr::str(&ssl.cacertfile)),
            attr("certfile", Expr::str(&ssl.certfile)),
            attr("fail_if_no_peer_cert", Expr::Bool(ssl.fail_if_no_peer_cert)),
            attr("keyfile", Expr::str(&ssl.keyfile)),
            attr(
                "server_name_indication",
                Expr::str(&ssl.server_name_indication),
            ),
            attr("verify", Expr::str(&ssl.verify)),
        ]);

        let connection = Expr::Object(vec![
            attr("api_port", Expr::Int(c.api_port)),
            attr("host", Expr::str(&c.host)),
            attr("password", Expr::str(&c.password)),
            attr("port", Expr::Int(c.port)),
            attr("ssl_options", ssl_options),
            attr("user", Expr::str(&c.user)),
            attr("virtual_host", Expr::str(&c.virtual_host)),
        ]);

        vec![
            attr("name", Expr::str(&self.name)),
            attr("address_handling", Expr::str(&self.address_handling)),
            attr("connection", connection),
            attr("connection_type", Expr::str(&self.connection_type)),
            attr("direction", Expr::str(&self.direction)),
            attr("enabled", Expr::Bool(self.enabled)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Connection, SslOptions};
    use crate::render::render_resource;
    use pretty_assertions::assert_eq;

    #[test]
    fn link_block_nests_connection_and_ssl() {
        let link = Link {
            id: EntityId::from("l1"),
            name: "upstream".into(),
            address_handling: "union".into(),
            connection: Connection {
                api_port: 15672,
                host: "rmq.example.com".into(),
                password: "s3cr\"t".into(),
                port: 5673,
                ssl_options: SslOptions {
                    cacertfile: "/etc/ca.pem".into(),
                    certfile: "/etc/cert.pem".into(),
                    fail_if_no_peer_cert: true,
                    keyfile: "/etc/key.pem".into(),
                    server_name_indication: "disable".into(),
                    verify: "verify_peer".into(),
                },
                user: "dog".into(),
                virtual_host: "dog".into(),
            },
            connection_type: "amqp".into(),
            direction: "bidirectional".into(),
            enabled: false,
        };

        let text = render_resource(&link, "upstream", "prod", &AddressBook::default());
        assert_eq!(
            text,
            r#"resource "dog_link" "upstream" {
  name = "upstream"
  address_handling = "union"
  connection = {
    api_port = 15672
    host = "rmq.example.com"
    password = "s3cr\"t"
    port = 5673
    ssl_options = {
      cacertfile = "/etc/ca.pem"
      certfile = "/etc/cert.pem"
      fail_if_no_peer_cert = true
      keyfile = "/etc/key.pem"
      server_name_indication = "disable"
      verify = "verify_peer"
    }
    user = "dog"
    virtual_host = "dog"
  }
  connection_type = "amqp"
  direction = "bidirectional"
  enabled = false
  provider = dog.prod
}
"#
        );
    }
}
